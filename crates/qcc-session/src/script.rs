//! Canned responses of the simulated remote shell.

/// The literal commands the remote shell understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedCommand {
    ListLong,
    List,
    WhoAmI,
    Pwd,
    Exit,
    Clear,
}

const SCRIPT: [(&str, ScriptedCommand); 6] = [
    ("ls -la", ScriptedCommand::ListLong),
    ("ls", ScriptedCommand::List),
    ("whoami", ScriptedCommand::WhoAmI),
    ("pwd", ScriptedCommand::Pwd),
    ("exit", ScriptedCommand::Exit),
    ("clear", ScriptedCommand::Clear),
];

/// What the shell does in reply to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Append these lines to the log.
    Lines(Vec<String>),
    /// Empty the log.
    Clear,
    /// Print `logout` and end the session.
    Logout,
}

impl ScriptedCommand {
    /// Match a trimmed line against the table, ignoring case.
    pub fn lookup(line: &str) -> Option<Self> {
        let lower = line.trim().to_lowercase();
        SCRIPT
            .iter()
            .find(|(literal, _)| *literal == lower)
            .map(|&(_, cmd)| cmd)
    }

    /// Output lines for commands that print something.
    fn lines(self, user: &str) -> Vec<String> {
        match self {
            Self::ListLong => vec![
                "total 24".to_string(),
                format!("drwxr-xr-x 4 {user} {user} 4096 Jul 29 11:00 ."),
                "drwxr-xr-x 3 root root 4096 Jul 29 10:55 ..".to_string(),
                format!("-rw-r--r-- 1 {user} {user} 220 Jul 29 10:55 .bash_logout"),
                format!("-rw-r--r-- 1 {user} {user} 3771 Jul 29 10:55 .bashrc"),
                format!("drwx------ 2 {user} {user} 4096 Jul 29 10:55 .ssh"),
                format!("-rw-r--r-- 1 {user} {user} 807 Jul 29 10:55 .profile"),
            ],
            Self::List => vec!["models/  scripts/  data/  README.md".to_string()],
            Self::WhoAmI => vec![user.to_string()],
            Self::Pwd => vec![format!("/home/{user}")],
            Self::Exit | Self::Clear => Vec::new(),
        }
    }
}

/// Reply to a non-empty, trimmed command line.
pub fn respond(command: &str, user: &str) -> Response {
    match ScriptedCommand::lookup(command) {
        Some(ScriptedCommand::Exit) => Response::Logout,
        Some(ScriptedCommand::Clear) => Response::Clear,
        Some(cmd) => Response::Lines(cmd.lines(user)),
        None => Response::Lines(vec![format!("-bash: {command}: command not found")]),
    }
}
