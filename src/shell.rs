use crate::error::ChessError;
use crate::game::{Game, GameStatus};
use crate::notation::{parse_move, to_algebraic};
use crate::player::AiPlayer;
use crate::search::{SearchOptions, DEFAULT_DEPTH, MAX_DEPTH};
use crate::square::{parse_square, square_representation};

use regex::Regex;
use rustyline::config::Configurer;
use rustyline::Editor;
use std::collections::BTreeMap;
use std::fmt::{Display, Error, Formatter};
use std::time::{Duration, Instant};

const HELP: &str = "\
new                                  start a new game
position startpos|fen <fen> [moves <m1> <m2> ...]
moves <square>                       legal destinations of a piece
move <move> | <move>                 play a move (e2e4, Nf3, O-O, e8=Q)
undo [n]                             take back the last n plies (default 1)
play                                 let the computer move for the side to move
go [depth <n>] [movetime <ms>]       search the position without playing
show | fen | history | status
setoption name <name> value <value>
options
perft <depth>
quit";

/// Console front end to a game against the computer
pub struct Shell {
    game: Game,
    player: AiPlayer,
    options: BTreeMap<String, ShellOption>,
}
impl Default for Shell {
    fn default() -> Self {
        let options = [
            ShellOption::Spin {
                name: "Depth".to_string(),
                value: DEFAULT_DEPTH as i32,
                default: DEFAULT_DEPTH as i32,
                min: 1,
                max: MAX_DEPTH as i32,
            },
            ShellOption::Spin {
                name: "Threads".to_string(),
                value: 1,
                default: 1,
                min: 1,
                max: num_cpus::get() as i32,
            },
            ShellOption::Spin {
                name: "Difficulty".to_string(),
                value: 5,
                default: 5,
                min: 1,
                max: 10,
            },
            ShellOption::Check {
                name: "AutoReply".to_string(),
                value: true,
                default: true,
            },
        ];
        let mut shell = Shell {
            game: Game::new(),
            player: AiPlayer::default(),
            options: options.into_iter().map(|o| (o.name().to_string(), o)).collect(),
        };
        shell.apply_options();
        shell
    }
}

impl Shell {
    pub fn run(&mut self) {
        let mut editor = Editor::<()>::new();
        editor.set_auto_add_history(true);
        editor.set_check_cursor_position(true);

        println!("{}\n", self.game.board());
        while let Ok(line) = editor.readline("caissa> ") {
            match self.handle_command(&line) {
                Ok(ShellOkCode::ShouldQuit) => break,
                Err(ShellErrCode::BadCommand(cmd)) => {
                    eprintln!("Unknown or badly formed command: {} (try help)", cmd)
                }
                Err(ShellErrCode::MissingArg(arg)) => {
                    eprintln!("Missing an argument: {} {} <- here", line.trim(), arg)
                }
                Err(ShellErrCode::Chess(e)) => eprintln!("{}", e),
                _ => (),
            }
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    fn handle_command(&mut self, line: &str) -> Result<ShellOkCode, ShellErrCode> {
        let args_regex = Self::args_regex();
        let mut args = args_regex.find_iter(line).map(|m| m.as_str());
        let cmd = if let Some(c) = args.next() {
            c
        } else {
            return Err(ShellErrCode::NoCommand);
        };
        match cmd {
            "help" => println!("{}", HELP),
            "new" => {
                self.game = Game::new();
                println!("{}", self.game.board())
            }
            "position" => {
                let mut game = match args.next() {
                    Some("startpos") => Game::new(),
                    Some("fen") => {
                        let fen: Vec<&str> = args.by_ref().take_while(|a| *a != "moves").collect();
                        if fen.is_empty() {
                            return Err(ShellErrCode::MissingArg(String::from("<fen>")));
                        }
                        Game::from_fen(&fen.join(" ").replace('"', ""))?
                    }
                    Some(other) => return Err(ShellErrCode::BadCommand(format!("position {}", other))),
                    None => return Err(ShellErrCode::MissingArg(String::from("<startpos | fen>"))),
                };
                for mv in args.filter(|a| *a != "moves") {
                    game.play_str(mv)?;
                }
                self.game = game;
            }
            "moves" => {
                let sq_str = args.next().ok_or_else(|| ShellErrCode::MissingArg(String::from("<square>")))?;
                let sq = parse_square(sq_str)
                    .filter(|_| sq_str.len() == 2)
                    .ok_or_else(|| ShellErrCode::BadCommand(format!("moves {}", sq_str)))?;
                let targets = self.game.select((sq % 8) as i32, (sq / 8) as i32)?;
                let shown: Vec<String> = targets.into_iter().filter_map(square_representation).collect();
                println!("{}", if shown.is_empty() { String::from("(none)") } else { shown.join(" ") });
            }
            "move" => {
                let mv = args.next().ok_or_else(|| ShellErrCode::MissingArg(String::from("<move>")))?;
                self.user_move(mv)?;
            }
            "undo" => {
                let count = args.next().and_then(|n| n.parse::<usize>().ok()).unwrap_or(1);
                for _ in 0..count {
                    match self.game.undo() {
                        Some(mv) => println!("took back {}", mv),
                        None => break,
                    }
                }
            }
            "play" => self.computer_move()?,
            "go" => {
                let options = self.parse_go_args(args);
                let search = self.player.search_framework().run_search(self.game.board(), &options);
                println!("info {}", search);
                match search.best_move {
                    Some(mv) => {
                        let san = to_algebraic(&mut self.game.board().clone(), mv)?;
                        println!("bestmove {} ({})", mv, san)
                    }
                    None => println!("bestmove (none)"),
                }
            }
            "show" => {
                println!("{}", self.game.board());
                if let Some(mv) = self.game.board().last_move() {
                    println!("last move: {}", mv);
                }
            }
            "fen" => println!("{}", self.game.fen()),
            "history" => println!("{}", self.game.formatted_moves()),
            "status" => println!("{}", self.game.status()),
            "setoption" => {
                let option_name = if let Some("name") = args.next() {
                    args.next().unwrap_or("")
                } else {
                    ""
                };
                let option_value = match args.nth(1) {
                    Some(v) => v,
                    None => return Err(ShellErrCode::MissingArg(String::from("<value>"))),
                };
                match self.options.get_mut(option_name) {
                    Some(option) => option.set_value(option_value),
                    None => return Err(ShellErrCode::BadCommand(format!("setoption name {}", option_name))),
                }
                self.apply_options();
            }
            "options" => self.options.values().for_each(|o| println!("option {} value {}", o, o.value_string())),
            "perft" => {
                let depth = args
                    .next()
                    .and_then(|d| d.parse::<u32>().ok())
                    .ok_or_else(|| ShellErrCode::MissingArg(String::from("<depth>")))?;
                let mut board = self.game.board().clone();
                let start = Instant::now();
                let nodes = crate::perft(&mut board, depth);
                println!("{} nodes in {}ms", nodes, start.elapsed().as_millis());
            }
            "quit" | "exit" => return Ok(ShellOkCode::ShouldQuit),
            // Anything else is read as a move
            _ => {
                if args.next().is_some() {
                    return Err(ShellErrCode::BadCommand(String::from(cmd)));
                }
                if parse_move(&mut self.game.board().clone(), cmd).is_err() && cmd.chars().all(|c| c.is_ascii_lowercase()) {
                    return Err(ShellErrCode::BadCommand(String::from(cmd)));
                }
                self.user_move(cmd)?;
            }
        }

        Ok(ShellOkCode::OkCommand)
    }

    fn user_move(&mut self, mv: &str) -> Result<(), ShellErrCode> {
        let san = self.game.play_str(mv)?;
        println!("{}", san);
        if self.report_status() {
            return Ok(());
        }
        if self.check_value("AutoReply") {
            self.computer_move()?;
        }
        Ok(())
    }

    fn computer_move(&mut self) -> Result<(), ShellErrCode> {
        let mv = self.player.choose_move(self.game.board())?;
        let san = self.game.play(mv)?;
        println!("computer plays {}", san);
        self.report_status();
        Ok(())
    }

    /// Prints check and end of game notices, returning whether the game is over
    fn report_status(&mut self) -> bool {
        let status = self.game.status();
        match status {
            GameStatus::Ongoing => (),
            _ => println!("{}", status),
        }
        status.is_over()
    }

    fn apply_options(&mut self) {
        let depth = self.spin_value("Depth");
        let threads = self.spin_value("Threads");
        let difficulty = self.spin_value("Difficulty");
        self.player.set_depth(depth as u8);
        self.player.set_threads(threads as usize);
        self.player.set_difficulty(difficulty as u8);
    }

    fn spin_value(&self, name: &str) -> i32 {
        match self.options.get(name) {
            Some(ShellOption::Spin { value, .. }) => *value,
            _ => 1,
        }
    }

    fn check_value(&self, name: &str) -> bool {
        matches!(self.options.get(name), Some(ShellOption::Check { value: true, .. }))
    }

    fn parse_go_args<'a, I: Iterator<Item = &'a str>>(&self, mut args: I) -> SearchOptions {
        let mut options = SearchOptions::default();
        options
            .set_depth(self.spin_value("Depth") as u8)
            .set_threads(self.spin_value("Threads") as usize);
        while let Some(arg) = args.next() {
            match arg {
                "depth" => {
                    if let Some(d) = args.next().and_then(|d| d.parse::<u8>().ok()) {
                        options.set_depth(d);
                    }
                }
                "movetime" => {
                    let time = args.next().and_then(|t| t.parse::<u64>().ok()).map(Duration::from_millis);
                    options.set_time(time);
                }
                _ => (),
            }
        }
        options
    }

    fn args_regex() -> Regex {
        Regex::new(r#"(".*?"|[^"\s]+)"#).unwrap()
    }
}

#[derive(Debug, PartialEq)]
enum ShellOkCode {
    OkCommand,
    ShouldQuit,
}

#[derive(Debug, PartialEq)]
enum ShellErrCode {
    MissingArg(String),
    NoCommand,
    BadCommand(String),
    Chess(ChessError),
}
impl From<ChessError> for ShellErrCode {
    fn from(e: ChessError) -> Self {
        ShellErrCode::Chess(e)
    }
}

pub enum ShellOption {
    Check {
        name: String,
        value: bool,
        default: bool,
    },
    Spin {
        name: String,
        value: i32,
        default: i32,
        min: i32,
        max: i32,
    },
}
impl ShellOption {
    pub fn name(&self) -> &str {
        match self {
            Self::Check { name, .. } | Self::Spin { name, .. } => name,
        }
    }

    pub fn set_value(&mut self, v: &str) {
        match self {
            Self::Check { value, .. } => *value = v.parse::<bool>().unwrap_or(*value),
            Self::Spin { value, min, max, .. } => {
                let parsed = v.parse::<i32>().unwrap_or(*value);
                *value = parsed.clamp(*min, *max)
            }
        }
    }

    fn value_string(&self) -> String {
        match self {
            Self::Check { value, .. } => value.to_string(),
            Self::Spin { value, .. } => value.to_string(),
        }
    }
}
impl Display for ShellOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Self::Check { name, default, .. } => {
                write!(f, "name {} type check default {}", name, default)
            }
            Self::Spin { name, default, min, max, .. } => write!(
                f,
                "name {} type spin default {} min {} max {}",
                name, default, min, max
            ),
        }
    }
}
