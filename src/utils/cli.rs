use std::io;

/// Commands of the interactive loop.
pub enum Command {
    NewGame(Option<String>),   // new [fen]
    Move(String),              // move <from><to>, long algebraic
    Undo,                      // undo the last ply
    Moves(Option<String>),     // moves [square] - list or highlight legal moves
    Go,                        // start the background search
    Stop,                      // collect the search result and play it
    Ai,                        // synchronous search-and-play
    Perft(String),             // perft <depth>
    Eval,                      // eval - print the static evaluation
    Fen,                       // fen - print the position as FEN
    Print,                     // print the board
    Quit,                      // quit the program

    Invalid(String), // placeholder for invalid commands so we can pattern match
}

impl Command {
    pub fn receive() -> Command {
        let mut input = String::new();

        let bytes = io::stdin()
            .read_line(&mut input)
            .expect("Failed to read line");

        // End of input is a quit
        if bytes == 0 {
            return Command::Quit;
        }

        let parts = input.as_str().trim().split_whitespace().collect::<Vec<_>>();

        match parts.as_slice() {
            ["new"] => Command::NewGame(None),
            ["new", fen @ ..] if !fen.is_empty() => Command::NewGame(Some(fen.join(" "))),
            ["move", notation] => Command::Move(notation.to_string()),
            ["undo"] => Command::Undo,
            ["moves"] => Command::Moves(None),
            ["moves", square] => Command::Moves(Some(square.to_string())),
            ["go"] => Command::Go,
            ["stop"] => Command::Stop,
            ["ai"] => Command::Ai,
            ["perft", depth] => Command::Perft(depth.to_string()),
            ["eval"] => Command::Eval,
            ["fen"] => Command::Fen,
            ["print"] => Command::Print,
            ["quit"] => Command::Quit,
            _ => Command::Invalid(input),
        }
    }
}
