// ui.rs - Plain-text frames for the terminal

use packed_life::Board;

/// Status line in the same terms as the board statistics.
pub fn status_line(board: &Board) -> String {
    let total = board.layout().cell_count();
    let live = board.population();
    format!(
        "Generation: {}  Live cells: {}  Dead cells: {}  Population: {:.1}%",
        board.generation(),
        live,
        total - live,
        live as f64 / total as f64 * 100.0
    )
}

/// Status line followed by the board, `#` for live cells.
pub fn frame(board: &Board) -> String {
    let mut out = status_line(board);
    out.push('\n');
    out.push_str(&board.render_text());
    out
}
