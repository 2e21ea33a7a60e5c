// properties.rs - Whole-board behaviour of packed_life

use packed_life::{
    BackendKind, Board, BoardConfig, GenerationHistory, PackedBuffer, SectionLayout, SerialBackend, TransitionKernel,
    patterns,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

const LAYOUTS: &[(usize, usize, usize, usize)] = &[
    (32, 32, 1, 1),
    (64, 32, 4, 2),
    (48, 16, 3, 4),
    (64, 64, 8, 4),
    (128, 64, 4, 2),
];

#[test]
fn test_valid_layouts_always_advance() {
    for &(w, h, xs, ys) in LAYOUTS {
        let mut board = Board::initialize(w, h, xs, ys).unwrap();
        board.seed_random_with(0.3, 11).unwrap();
        for expected in 1..=20 {
            assert_eq!(board.advance(), expected);
        }
    }
}

#[test]
fn test_single_cell_round_trip() {
    for &(w, h, xs, ys) in LAYOUTS {
        let mut board = Board::initialize(w, h, xs, ys).unwrap();
        let (x, y) = (w - 3, h / 2 + 1);
        board.seed_cells(&[(x, y)]).unwrap();
        for cy in 0..h {
            for cx in 0..w {
                assert_eq!(board.get_cell(cx, cy).unwrap(), (cx, cy) == (x, y));
            }
        }
    }
}

#[test]
fn test_random_pattern_decode_encode_idempotent() {
    let mut rng = StdRng::seed_from_u64(2024);
    for &(w, h, xs, ys) in LAYOUTS {
        let layout = SectionLayout::new(w, h, xs, ys).unwrap();
        let mask = layout.occupied_mask();
        let original: Vec<u8> = (0..layout.word_count())
            .flat_map(|_| (rng.next_u32() & mask).to_le_bytes())
            .collect();

        let mut packed = PackedBuffer::new(layout);
        packed.load_le_bytes(&original).unwrap();

        // Decode to cells, then encode them into a fresh buffer
        let mut rebuilt = PackedBuffer::new(layout);
        for (x, y) in packed.alive_cells() {
            let address = layout.encode(x, y).unwrap();
            assert_eq!(layout.decode(address).unwrap(), (x, y));
            rebuilt
                .set_bit(address.word_index, address.section_x, address.section_y, true)
                .unwrap();
        }
        assert_eq!(rebuilt.to_le_bytes(), original);
    }
}

#[test]
fn test_block_is_still() {
    let mut board = Board::initialize(64, 32, 4, 2).unwrap();
    let block = [(10, 10), (11, 10), (10, 11), (11, 11)];
    board.seed_cells(&block).unwrap();
    board.advance();
    assert_eq!(board.current_state().alive_cells(), block.to_vec());
}

#[test]
fn test_blinker_period_two() {
    let mut board = Board::initialize(16, 16, 2, 2).unwrap();
    board.seed_cells(&[(7, 3), (8, 3), (9, 3)]).unwrap();

    board.advance();
    assert_eq!(board.current_state().alive_cells(), vec![(8, 2), (8, 3), (8, 4)]);

    board.advance();
    assert_eq!(board.current_state().alive_cells(), vec![(7, 3), (8, 3), (9, 3)]);
}

#[test]
fn test_blinker_across_section_corner() {
    // Centred on the corner shared by four sections
    let mut board = Board::initialize(64, 32, 4, 2).unwrap();
    board.seed_cells(&[(15, 16), (16, 16), (17, 16)]).unwrap();
    board.advance();
    assert_eq!(board.current_state().alive_cells(), vec![(16, 15), (16, 16), (16, 17)]);
}

#[test]
fn test_wrap_joins_opposite_columns() {
    let mut board = Board::initialize(32, 32, 2, 2).unwrap();
    // Vertical pair on the last column plus one cell on column 0: the cell
    // next to it on column 0 has three neighbours only through the wrap.
    board.seed_cells(&[(31, 9), (31, 10), (0, 11)]).unwrap();
    board.advance();
    assert!(board.get_cell(0, 10).unwrap());
    assert!(board.get_cell(31, 10).unwrap());
}

#[test]
fn test_edge_columns_are_mutual_neighbours() {
    let mut board = Board::initialize(64, 32, 4, 2).unwrap();
    board.seed_cells(&[(63, 20), (0, 20)]).unwrap();
    let state = board.current_state();
    let layout = state.layout();

    let left = TransitionKernel::sample(state, layout.encode(0, 20).unwrap());
    assert!(left[1][0]);
    let right = TransitionKernel::sample(state, layout.encode(63, 20).unwrap());
    assert!(right[1][2]);
}

#[test]
fn test_wrap_blinker_on_edges() {
    let mut board = Board::initialize(32, 32, 2, 2).unwrap();
    board.seed_cells(&[(31, 0), (0, 0), (1, 0)]).unwrap();
    board.advance();
    assert_eq!(board.current_state().alive_cells(), vec![(0, 0), (0, 1), (0, 31)]);
    board.advance();
    assert_eq!(board.current_state().alive_cells(), vec![(0, 0), (1, 0), (31, 0)]);
}

#[test]
fn test_glider_returns_after_full_lap() {
    // A glider moves one cell diagonally every four generations
    let mut board = Board::initialize(32, 32, 2, 2).unwrap();
    board.seed_pattern(patterns::find("Glider").unwrap(), (3, 3)).unwrap();
    let start = board.current_state().clone();
    board.advance_by(4 * 32);
    assert_eq!(board.current_state(), &start);
}

#[test]
fn test_generation_counter() {
    let mut board = Board::initialize(64, 32, 4, 2).unwrap();
    assert_eq!(board.generation(), 0);
    let mut last = 0;
    for _ in 0..7 {
        let next = board.advance();
        assert_eq!(next, last + 1);
        last = next;
    }
    assert_eq!(board.advance_by(3), 10);
}

#[test]
fn test_independent_instances_are_identical() {
    let config = BoardConfig {
        width: 128,
        height: 64,
        x_sections: 4,
        y_sections: 2,
        ..BoardConfig::default()
    };
    let mut a = Board::from_config(&config).unwrap();
    let mut b = Board::from_config(&BoardConfig {
        backend: BackendKind::Serial,
        ..config
    })
    .unwrap();
    a.seed_random_with(0.35, 4242).unwrap();
    b.seed_random_with(0.35, 4242).unwrap();

    for _ in 0..40 {
        a.advance();
        b.advance();
        assert_eq!(a.export_bytes(), b.export_bytes());
    }
}

#[test]
fn test_history_spots_blinker() {
    let layout = SectionLayout::new(16, 16, 2, 2).unwrap();
    let mut board = Board::with_backend(layout, Box::new(SerialBackend));
    board.seed_pattern(patterns::find("Blinker").unwrap(), (7, 3)).unwrap();

    let mut history = GenerationHistory::default();
    assert!(!history.check_for_cycle(board.state_hash()));
    board.advance();
    assert!(!history.check_for_cycle(board.state_hash()));
    board.advance();
    assert!(history.check_for_cycle(board.state_hash()));
}

#[test]
fn test_gosper_gun_grows() {
    let mut board = Board::initialize(128, 64, 4, 2).unwrap();
    board.seed_pattern(patterns::find("Gosper Glider Gun").unwrap(), (2, 2)).unwrap();
    assert_eq!(board.population(), 36);
    board.advance_by(30);
    // One period later the gun is back plus one glider
    assert_eq!(board.population(), 36 + 5);
}
