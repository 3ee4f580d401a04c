use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShooterError {
    #[error("could not open the game window: {0}")]
    Window(#[from] minifb::Error),
    #[error("could not load pop sound {path:?}")]
    PopSound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not start landmark helper `{command}`")]
    HelperSpawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("landmark helper `{0}` has no stdout")]
    HelperStdout(String),
    #[error("invalid value {value:?} for {flag}")]
    BadFlagValue { flag: String, value: String },
    #[error("unknown argument {0:?}")]
    UnknownArgument(String),
    #[error("{0} needs a value")]
    MissingValue(String),
}
