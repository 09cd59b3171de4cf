//! Line commands read from stdin.

use chipfire_graph::{NodeId, Vec2};

/// One player action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Fire(NodeId),
    Tick(usize),
    Drag(NodeId, Vec2),
    Release(NodeId),
    Next,
    Save,
    Help,
    Quit,
}

pub const USAGE: &str = "\
Commands:
  show                 Print the board
  fire <node>          Fire a node (click it)
  tick [frames]        Run the layout for some frames (default 1)
  drag <node> <x> <y>  Hold a node at a position
  release <node>       Let go of a held node
  next                 Start the next puzzle once the board is won
  save                 Write progress to the save file
  help                 Show this message
  quit                 Save and exit";

fn node(arg: Option<&str>) -> Result<NodeId, String> {
    let arg = arg.ok_or("missing node index")?;
    arg.parse()
        .map(NodeId)
        .map_err(|_| format!("invalid node index: {}", arg))
}

fn coordinate(arg: Option<&str>) -> Result<f64, String> {
    let arg = arg.ok_or("missing coordinate")?;
    arg.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid coordinate: {}", arg))
}

impl Command {
    /// Parse one input line. A blank line shows the board.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Command::Show);
        };

        let command = match verb {
            "show" | "s" => Command::Show,
            "fire" | "f" => Command::Fire(node(words.next())?),
            "tick" | "t" => {
                let frames = match words.next() {
                    Some(arg) => arg
                        .parse()
                        .map_err(|_| format!("invalid frame count: {}", arg))?,
                    None => 1,
                };
                Command::Tick(frames)
            }
            "drag" => {
                let id = node(words.next())?;
                let x = coordinate(words.next())?;
                let y = coordinate(words.next())?;
                Command::Drag(id, Vec2::new(x, y))
            }
            "release" => Command::Release(node(words.next())?),
            "next" | "n" => Command::Next,
            "save" => Command::Save,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {} (try 'help')", other)),
        };

        match words.next() {
            Some(extra) => Err(format!("unexpected argument: {}", extra)),
            None => Ok(command),
        }
    }
}
