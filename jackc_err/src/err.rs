/// Common behaviour for every error raised while compiling a source unit.
pub trait JackErr {
    /// Writes the error to stderr.
    fn emit(&self);

    /// Returns the human readable message for this error, including
    /// position information where available.
    fn to_msg(&self) -> String;
}
