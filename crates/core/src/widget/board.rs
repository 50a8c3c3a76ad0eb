//! The board renderer widget
//!
//! `load_fen` is single-shot and synchronous: parse, resolve the mount
//! target, clear it, rebuild the whole tree. Nothing persists between calls
//! except the configuration and the last-parsed side to move.

use rand::Rng;

use crate::board::geometry::BoardGeometry;
use crate::board::piece::Color;
use crate::dom::{Dom, MountTarget, NodeId};
use crate::error::{Error, Result};
use crate::parser::fen::{parse_fen, ParsedFen};

pub type PieceMovedCallback = Box<dyn FnMut(u8, u8) + Send>;

/// Render options, fixed at construction and adjustable through setters.
/// Changes take effect on the next `load_fen`.
pub struct BoardProps {
    pub css_path: String,
    /// Reserved for image-based piece sets.
    pub image_folder: String,
    pub square_size: u32,
    pub board_labels: bool,
    pub flip_board_when_black_to_move: bool,
    /// Rendering style selector, not interpreted by the glyph path.
    pub piece_type: String,
    pub piece_moved_callback: Option<PieceMovedCallback>,
}

impl Default for BoardProps {
    fn default() -> Self {
        Self {
            css_path: "css/chess.css".to_string(),
            image_folder: "images/".to_string(),
            square_size: 45,
            board_labels: true,
            flip_board_when_black_to_move: true,
            piece_type: "cases".to_string(),
            piece_moved_callback: None,
        }
    }
}

pub struct BoardWidget {
    props: BoardProps,
    who_to_move: Option<Color>,
}

impl BoardWidget {
    /// Creates the widget and injects its stylesheet link into the document
    /// head.
    pub fn new(dom: &mut Dom, props: BoardProps) -> Self {
        let widget = Self {
            props,
            who_to_move: None,
        };
        widget.load_css(dom);
        widget
    }

    fn load_css(&self, dom: &mut Dom) {
        let buster: u32 = rand::rng().random();
        let link = dom.create_element("link");
        dom.set_attr(link, "href", &format!("{}?rand={}", self.props.css_path, buster));
        dom.set_attr(link, "rel", "stylesheet");
        dom.set_attr(link, "media", "screen");
        dom.set_attr(link, "type", "text/css");
        let head = dom.head();
        dom.append_child(head, link);
    }

    pub fn set_square_size(&mut self, square_size: u32) {
        self.props.square_size = square_size;
    }

    pub fn set_piece_type(&mut self, piece_type: impl Into<String>) {
        self.props.piece_type = piece_type.into();
    }

    pub fn set_board_labels(&mut self, board_labels: bool) {
        self.props.board_labels = board_labels;
    }

    pub fn set_flip_board_when_black_to_move(&mut self, flip: bool) {
        self.props.flip_board_when_black_to_move = flip;
    }

    pub fn set_piece_moved_callback(&mut self, callback: PieceMovedCallback) {
        self.props.piece_moved_callback = Some(callback);
    }

    /// Side to move of the last loaded position, `None` before the first
    /// `load_fen`.
    pub fn who_to_move(&self) -> Option<Color> {
        self.who_to_move
    }

    fn flipped(&self) -> bool {
        self.who_to_move == Some(Color::Black) && self.props.flip_board_when_black_to_move
    }

    /// Geometry for the current orientation.
    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.props.square_size, self.flipped())
    }

    /// Parses `fen`, clears the mount target and builds the board tree into
    /// it: outer container, optional label strip, board surface, one element
    /// per piece.
    pub fn load_fen(
        &mut self,
        dom: &mut Dom,
        fen: &str,
        target: impl Into<MountTarget>,
    ) -> Result<()> {
        let parsed = parse_fen(fen)?;
        self.who_to_move = Some(parsed.side_to_move);

        let target = target.into();
        let mount = dom
            .resolve_mount(&target)
            .ok_or_else(|| Error::MountNotFound(target.describe()))?;
        dom.clear_children(mount);

        let size = self.props.square_size;
        let board = dom.create_element("div");
        dom.set_attr(board, "class", &format!("ChessBoardInner{}", size));
        dom.set_attr(board, "id", "chessBoardInner");

        if self.props.board_labels {
            let outer = dom.create_element("div");
            dom.set_attr(outer, "class", &format!("ChessBoard{}", size));
            dom.set_style(outer, "position", "relative");
            self.add_board_labels(dom, outer);
            dom.append_child(outer, board);
            dom.set_style(board, "position", "absolute");
            dom.set_style(board, "top", "0px");
            dom.set_style(board, "right", "0px");
            dom.append_child(mount, outer);
        } else {
            dom.set_style(board, "position", "relative");
            dom.append_child(mount, board);
        }

        self.place_pieces(dom, board, &parsed);
        Ok(())
    }

    /// One file label along the bottom edge and one rank label along the
    /// left edge per board line. Both sequences reverse when the board is
    /// flipped.
    fn add_board_labels(&self, dom: &mut Dom, outer: NodeId) {
        let letters = b"ABCDEFGH";
        let size = self.props.square_size;
        let flipped = self.flipped();
        let class = format!("ChessBoardLabel ChessBoardLabel{}", size);

        for no in 1..=8u32 {
            let file = dom.create_element("div");
            dom.set_attr(file, "class", &class);
            dom.set_style(file, "position", "absolute");
            dom.set_style(file, "right", &format!("{}px", (8 - no) * size));
            dom.set_style(file, "bottom", "0px");
            dom.set_style(file, "text-align", "center");
            dom.set_style(file, "width", &format!("{}px", size));
            let letter = if flipped {
                letters[(8 - no) as usize]
            } else {
                letters[(no - 1) as usize]
            };
            dom.set_text(file, &(letter as char).to_string());
            dom.append_child(outer, file);

            let rank = dom.create_element("div");
            dom.set_attr(rank, "class", &class);
            dom.set_style(rank, "position", "absolute");
            dom.set_style(rank, "left", "0px");
            dom.set_style(rank, "top", &format!("{}px", (8 - no) * size));
            dom.set_style(rank, "height", &format!("{}px", size));
            dom.set_style(rank, "line-height", &format!("{}px", size));
            let digit = if flipped { 9 - no } else { no };
            dom.set_text(rank, &digit.to_string());
            dom.append_child(outer, rank);
        }
    }

    fn place_pieces(&self, dom: &mut Dom, board: NodeId, parsed: &ParsedFen) {
        let geometry = self.geometry();
        let size = self.props.square_size;
        for placed in &parsed.placements {
            let square = BoardGeometry::square_for_scan(placed.scan_col);
            let (x, y) = geometry.pixel_origin(square);

            let piece = dom.create_element("div");
            dom.set_attr(piece, "class", &format!("ChessPiece{}", size));
            dom.set_style(piece, "position", "absolute");
            dom.set_style(piece, "left", &format!("{}px", x));
            dom.set_style(piece, "top", &format!("{}px", y));

            let span = dom.create_element("p");
            dom.set_attr(span, "class", &format!("Span{}", size));
            dom.set_attr(span, "draggable", "true");
            dom.set_text(span, &placed.piece.glyph().to_string());

            dom.append_child(piece, span);
            dom.append_child(board, piece);
        }
    }

    /// Drag-start half of the interaction layer: the square index under a
    /// pixel position within the board surface. The result is the drag
    /// payload.
    pub fn drag_payload_at(&self, x: i32, y: i32) -> Result<u8> {
        self.geometry().square_at(x, y)
    }

    /// Drag-start from a piece element, reading its own offsets.
    pub fn begin_drag(&self, dom: &Dom, piece: NodeId) -> Result<u8> {
        let x = parse_px(dom.style(piece, "left"));
        let y = parse_px(dom.style(piece, "top"));
        self.drag_payload_at(x, y)
    }

    /// Drop half: computes the destination square from the drop position,
    /// invokes the registered callback and returns (from, to). The widget
    /// does not re-render; the host decides what the move means and calls
    /// `load_fen` again if it wants it reflected.
    pub fn drop_at(&mut self, payload: u8, x: i32, y: i32) -> Result<(u8, u8)> {
        let to = self.geometry().square_at(x, y)?;
        if let Some(callback) = self.props.piece_moved_callback.as_mut() {
            callback(payload, to);
        }
        Ok((payload, to))
    }
}

fn parse_px(style: Option<&str>) -> i32 {
    style
        .and_then(|s| s.strip_suffix("px"))
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fen::START_FEN;
    use std::sync::{Arc, Mutex};

    const TWO_KINGS: &str = "4k3/8/8/8/8/8/8/4K3 w";

    fn mounted_dom() -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let mount = dom.create_element("div");
        dom.set_attr(mount, "id", "app");
        let body = dom.body();
        dom.append_child(body, mount);
        (dom, mount)
    }

    fn board_node(dom: &Dom) -> NodeId {
        dom.element_by_id("chessBoardInner").unwrap()
    }

    fn piece_positions(dom: &Dom) -> Vec<(String, i32, i32)> {
        let board = board_node(dom);
        dom.children(board)
            .iter()
            .map(|piece| {
                let span = dom.children(*piece)[0];
                (
                    dom.text(span).unwrap().to_string(),
                    parse_px(dom.style(*piece, "left")),
                    parse_px(dom.style(*piece, "top")),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_board_mounts_no_pieces() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget.load_fen(&mut dom, "8/8/8/8/8/8/8/8 w", mount).unwrap();
        assert!(dom.children(board_node(&dom)).is_empty());
    }

    #[test]
    fn test_full_board_mounts_all_pieces() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget.load_fen(&mut dom, START_FEN, mount).unwrap();
        assert_eq!(dom.children(board_node(&dom)).len(), 32);
    }

    #[test]
    fn test_two_kings_unflipped() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget.load_fen(&mut dom, TWO_KINGS, mount).unwrap();

        let pieces = piece_positions(&dom);
        assert_eq!(pieces.len(), 2);
        // Black king at scan-column 4, white king at scan-column 60.
        assert_eq!(pieces[0], ("♚".to_string(), 180, 0));
        assert_eq!(pieces[1], ("♔".to_string(), 180, 315));
    }

    #[test]
    fn test_two_kings_flipped() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget
            .load_fen(&mut dom, "4k3/8/8/8/8/8/8/4K3 b", mount)
            .unwrap();

        // 180-degree reflection of the unflipped positions.
        let pieces = piece_positions(&dom);
        assert_eq!(pieces[0], ("♚".to_string(), 135, 315));
        assert_eq!(pieces[1], ("♔".to_string(), 135, 0));
    }

    #[test]
    fn test_flip_disabled_keeps_orientation() {
        let (mut dom, mount) = mounted_dom();
        let props = BoardProps {
            flip_board_when_black_to_move: false,
            ..Default::default()
        };
        let mut widget = BoardWidget::new(&mut dom, props);
        widget
            .load_fen(&mut dom, "4k3/8/8/8/8/8/8/4K3 b", mount)
            .unwrap();

        let pieces = piece_positions(&dom);
        assert_eq!(pieces[0], ("♚".to_string(), 180, 0));
        assert_eq!(pieces[1], ("♔".to_string(), 180, 315));
    }

    fn label_texts(dom: &Dom, mount: NodeId) -> (Vec<String>, Vec<String>) {
        let outer = dom.children(mount)[0];
        let mut files = Vec::new();
        let mut ranks = Vec::new();
        for child in dom.children(outer) {
            if dom
                .attr(*child, "class")
                .is_some_and(|c| c.contains("ChessBoardLabel"))
            {
                if dom.style(*child, "bottom").is_some() {
                    files.push(dom.text(*child).unwrap().to_string());
                } else {
                    ranks.push(dom.text(*child).unwrap().to_string());
                }
            }
        }
        (files, ranks)
    }

    #[test]
    fn test_labels_unflipped() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget.load_fen(&mut dom, TWO_KINGS, mount).unwrap();

        let (files, ranks) = label_texts(&dom, mount);
        // Files A..H left to right, ranks 1..8 bottom to top.
        assert_eq!(files, vec!["A", "B", "C", "D", "E", "F", "G", "H"]);
        assert_eq!(ranks, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn test_labels_flipped() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget
            .load_fen(&mut dom, "4k3/8/8/8/8/8/8/4K3 b", mount)
            .unwrap();

        let (files, ranks) = label_texts(&dom, mount);
        assert_eq!(files, vec!["H", "G", "F", "E", "D", "C", "B", "A"]);
        assert_eq!(ranks, vec!["8", "7", "6", "5", "4", "3", "2", "1"]);
    }

    #[test]
    fn test_labels_disabled_mounts_board_directly() {
        let (mut dom, mount) = mounted_dom();
        let props = BoardProps {
            board_labels: false,
            ..Default::default()
        };
        let mut widget = BoardWidget::new(&mut dom, props);
        widget.load_fen(&mut dom, TWO_KINGS, mount).unwrap();

        let first = dom.children(mount)[0];
        assert_eq!(first, board_node(&dom));
        assert_eq!(dom.style(first, "position"), Some("relative"));
    }

    #[test]
    fn test_reload_replaces_content() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget.load_fen(&mut dom, START_FEN, mount).unwrap();
        widget.load_fen(&mut dom, TWO_KINGS, mount).unwrap();
        assert_eq!(dom.children(mount).len(), 1);
        assert_eq!(dom.children(board_node(&dom)).len(), 2);
    }

    #[test]
    fn test_mount_by_name_and_missing_mount() {
        let (mut dom, _mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget.load_fen(&mut dom, TWO_KINGS, "app").unwrap();
        let err = widget.load_fen(&mut dom, TWO_KINGS, "nowhere").unwrap_err();
        assert!(matches!(err, Error::MountNotFound(name) if name == "nowhere"));
    }

    #[test]
    fn test_who_to_move_tracking() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        assert_eq!(widget.who_to_move(), None);
        widget.load_fen(&mut dom, TWO_KINGS, mount).unwrap();
        assert_eq!(widget.who_to_move(), Some(Color::White));
        widget
            .load_fen(&mut dom, "4k3/8/8/8/8/8/8/4K3 b", mount)
            .unwrap();
        assert_eq!(widget.who_to_move(), Some(Color::Black));
    }

    #[test]
    fn test_setters_apply_on_next_load() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget.set_square_size(60);
        widget.set_board_labels(false);
        widget.load_fen(&mut dom, TWO_KINGS, mount).unwrap();

        let board = board_node(&dom);
        assert_eq!(dom.attr(board, "class"), Some("ChessBoardInner60"));
        let pieces = piece_positions(&dom);
        assert_eq!(pieces[0], ("♚".to_string(), 240, 0));
    }

    #[test]
    fn test_stylesheet_link_injected() {
        let mut dom = Dom::new();
        let _widget = BoardWidget::new(&mut dom, BoardProps::default());
        let head = dom.head();
        let link = dom.children(head)[0];
        assert_eq!(dom.tag(link), "link");
        assert!(dom
            .attr(link, "href")
            .unwrap()
            .starts_with("css/chess.css?rand="));
        assert_eq!(dom.attr(link, "rel"), Some("stylesheet"));
    }

    #[test]
    fn test_drag_and_drop_invokes_callback() {
        let (mut dom, mount) = mounted_dom();
        let moves: Arc<Mutex<Vec<(u8, u8)>>> = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&moves);
        let props = BoardProps {
            piece_moved_callback: Some(Box::new(move |from, to| {
                recorded.lock().unwrap().push((from, to));
            })),
            ..Default::default()
        };
        let mut widget = BoardWidget::new(&mut dom, props);
        widget.load_fen(&mut dom, START_FEN, mount).unwrap();

        // Drag the piece sitting at pixel (0, 0), drop at (90, 90).
        let payload = widget.drag_payload_at(0, 0).unwrap();
        assert_eq!(payload, 56);
        let (from, to) = widget.drop_at(payload, 90, 90).unwrap();
        assert_eq!((from, to), (56, 42));
        assert_eq!(moves.lock().unwrap().as_slice(), &[(56, 42)]);
    }

    #[test]
    fn test_begin_drag_reads_piece_offsets() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget.load_fen(&mut dom, TWO_KINGS, mount).unwrap();

        let pieces = dom.children(board_node(&dom)).to_vec();
        // The white king renders at (180, 315), which is e1 = square 4.
        assert_eq!(widget.begin_drag(&dom, pieces[1]).unwrap(), 4);
        // The black king at (180, 0) is e8 = square 60.
        assert_eq!(widget.begin_drag(&dom, pieces[0]).unwrap(), 60);
    }

    #[test]
    fn test_drop_outside_board_fails() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget.load_fen(&mut dom, TWO_KINGS, mount).unwrap();
        let err = widget.drop_at(4, 400, 10).unwrap_err();
        assert!(matches!(err, Error::OutsideBoard { x: 400, y: 10 }));
    }

    #[test]
    fn test_drop_without_callback_still_reports_move() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget.load_fen(&mut dom, TWO_KINGS, mount).unwrap();
        assert_eq!(widget.drop_at(4, 180, 180).unwrap(), (4, 28));
    }

    #[test]
    fn test_flipped_drag_payload_is_logical_square() {
        let (mut dom, mount) = mounted_dom();
        let mut widget = BoardWidget::new(&mut dom, BoardProps::default());
        widget
            .load_fen(&mut dom, "4k3/8/8/8/8/8/8/4K3 b", mount)
            .unwrap();

        // The white king renders at (135, 0) when flipped; dragging it still
        // yields e1.
        assert_eq!(widget.drag_payload_at(135, 0).unwrap(), 4);
    }
}
