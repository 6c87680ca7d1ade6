use clap::Parser;

use woodpusher::controller::{GameController, MoveResultType, Strategy};
use woodpusher::game::evaluate::score_board;
use woodpusher::game::BoardSquare;
use woodpusher::utils::Command;

/// Terminal chess against a fixed-depth negamax engine.
#[derive(Parser)]
#[command(name = "woodpusher")]
struct Args {
    /// Starting position in FEN (castling rights are ignored)
    #[arg(long)]
    fen: Option<String>,

    /// How the engine picks its moves
    #[arg(long, value_enum, default_value_t = Strategy::Negamax)]
    strategy: Strategy,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let mut controller = GameController::new(args.strategy);
    if let Some(fen) = &args.fen {
        controller.new_game(Some(fen));
    }

    controller.print();

    loop {
        match Command::receive() {
            Command::Quit => break,
            Command::NewGame(fen) => {
                controller.new_game(fen.as_deref());
                controller.print();
            }
            Command::Move(notation) => {
                match controller.try_move_piece(&notation) {
                    MoveResultType::Success => {
                        controller.print();
                        report_game_end(&mut controller);
                    }
                    result => log::info!("{:?}", result),
                };
            }
            Command::Undo => match controller.try_unmove_piece() {
                MoveResultType::Success => controller.print(),
                result => log::info!("{:?}", result),
            },
            Command::Moves(square_string) => {
                let moves = controller.state.get_valid_moves();

                match square_string.as_deref().map(BoardSquare::parse) {
                    None => {
                        for board_move in &moves {
                            print!("{} ", board_move.unparse());
                        }
                        println!();
                    }
                    Some(Some(square)) => {
                        let targets = moves
                            .iter()
                            .filter(|m| m.start == square)
                            .map(|m| m.end)
                            .collect::<Vec<_>>();
                        controller.print_with_moves(&targets);
                    }
                    Some(None) => log::info!("not a square"),
                }
            }
            Command::Go => controller.start_search(),
            Command::Stop | Command::Ai => play_engine_move(&mut controller),
            Command::Perft(depth_string) => match depth_string.parse::<usize>() {
                Ok(depth) => {
                    let moves = controller.perft(depth);

                    for (board_move, count) in &moves {
                        println!("{}: {}", board_move.unparse(), count);
                    }

                    let total: usize = moves.iter().map(|(_, count)| count).sum();
                    println!("\nNodes: {}", total);
                }
                Err(_) => log::info!("not a depth"),
            },
            Command::Eval => println!("{:.2}", score_board(&controller.state)),
            Command::Fen => controller.print_fen(),
            Command::Print => controller.print(),
            Command::Invalid(input) => log::info!("invalid command: {}", input.trim()),
        }
    }
}

/// Starts a search if none is outstanding, waits for its move and plays it.
fn play_engine_move(controller: &mut GameController) {
    if !controller.search_in_progress() {
        controller.start_search();
    }

    match controller.await_search() {
        Some(board_move) => {
            println!("engine plays {}", board_move.unparse());
            match controller.play_move(board_move) {
                MoveResultType::Success => {
                    controller.print();
                    report_game_end(controller);
                }
                result => log::info!("engine move rejected: {:?}", result),
            }
        }
        None => println!("no move available"),
    }
}

fn report_game_end(controller: &mut GameController) {
    if let Some(message) = controller.check_game_end() {
        println!("{}", message);
    }
}
