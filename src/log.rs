use colored::Colorize;

/// Prefix printed in front of console lines, coloured per subsystem.
#[derive(Clone, Copy)]
pub enum Tag {
    Startup,
    Sync,
    Screen,
    Error,
}

pub const STARTUP: Tag = Tag::Startup;
pub const SYNC: Tag = Tag::Sync;
pub const SCREEN: Tag = Tag::Screen;
pub const ERROR: Tag = Tag::Error;

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Tag::Startup => "(startup)".green(),
            Tag::Sync => "(sync)".cyan(),
            Tag::Screen => "(screen)".blue(),
            Tag::Error => "(error)".red().bold(),
        };
        write!(f, "{}", tag)
    }
}
