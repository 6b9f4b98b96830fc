use lib::chess::{Promotion, Team};
use lib::rules::{Board, Game};
use test_strategy::proptest;

const PROMOTIONS: [Promotion; 4] = [
    Promotion::Knight,
    Promotion::Bishop,
    Promotion::Rook,
    Promotion::Queen,
];

fn perft(board: &Board, turn: Team, depth: u8) -> usize {
    if depth == 0 {
        return 1;
    }

    let mut board = board.clone();
    let pieces = Vec::from_iter(board.pieces_of(turn).map(|(p, _)| p.id()));

    let mut nodes = 0;
    for id in pieces {
        for whither in board.legal_destinations(id).unwrap() {
            let promotions = match board.promotes(id, whither).unwrap() {
                true => PROMOTIONS.map(Some).to_vec(),
                false => vec![None],
            };

            for promotion in promotions {
                if depth == 1 {
                    nodes += 1;
                } else {
                    let mut game = Game::new(board.clone(), turn);
                    game.commit(id, whither, promotion).unwrap();
                    nodes += perft(game.board(), !turn, depth - 1);
                }
            }
        }
    }

    nodes
}

#[cfg(not(tarpaulin))]
#[proptest(cases = 1)]
fn perft_expands_expected_number_of_nodes() {
    // https://www.chessprogramming.org/Perft_Results#Initial_Position
    let board = Board::default();
    assert_eq!(perft(&board, Team::White, 1), 20);
    assert_eq!(perft(&board, Team::White, 2), 400);
    assert_eq!(perft(&board, Team::White, 3), 8902);

    // https://www.chessprogramming.org/Perft_Results#Position_2
    let board = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R".parse()?;
    assert_eq!(perft(&board, Team::White, 1), 48);
    assert_eq!(perft(&board, Team::White, 2), 2039);

    // https://www.chessprogramming.org/Perft_Results#Position_3
    let board = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8".parse()?;
    assert_eq!(perft(&board, Team::White, 1), 14);
    assert_eq!(perft(&board, Team::White, 2), 191);
    assert_eq!(perft(&board, Team::White, 3), 2812);

    // https://www.chessprogramming.org/Perft_Results#Position_4
    let board = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1".parse()?;
    assert_eq!(perft(&board, Team::White, 1), 6);
    assert_eq!(perft(&board, Team::White, 2), 264);
}
