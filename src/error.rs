use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not load palette")]
    Palette,
    #[display("could not read world")]
    World,
    /// `regions` was run without a world directory on the command line or in
    /// the configuration.
    #[display("no world directory given")]
    NoWorld,
}
