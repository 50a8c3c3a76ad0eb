//! Fenview Core Library
//!
//! Renders chess positions given in Forsyth-Edwards Notation as an element
//! tree: squares, coordinate labels and one draggable element per piece.
//! The widget draws against an injected in-memory document, leaving game
//! logic, stylesheets and event delivery to the embedding host.

pub mod board;
pub mod dom;
pub mod error;
pub mod parser;
pub mod widget;

pub use board::{BoardGeometry, Color, Piece, Role};
pub use dom::{Dom, MountTarget, NodeId};
pub use error::{Error, Result};
pub use parser::{parse_fen, FenError, ParsedFen, START_FEN};
pub use widget::{BoardProps, BoardWidget, PieceMovedCallback};

/// Renders a FEN position straight to HTML markup.
///
/// One-shot convenience for hosts that only want the markup: builds a
/// document, mounts the widget into a `div#board`, and serializes that
/// subtree.
pub fn render_position(fen: &str, props: BoardProps) -> Result<String> {
    let mut dom = Dom::new();
    let mount = dom.create_element("div");
    dom.set_attr(mount, "id", "board");
    let body = dom.body();
    dom.append_child(body, mount);

    let mut widget = BoardWidget::new(&mut dom, props);
    widget.load_fen(&mut dom, fen, mount)?;
    Ok(dom.to_html(mount))
}
