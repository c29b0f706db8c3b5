#[derive(Clone, Debug, Default)]
pub struct CompileConfig {
    /// Emit a `// Compiled <Class>.jack` comment ahead of the generated code.
    pub header_comment: bool,

    /// Log the class and subroutine symbol tables at debug level as each
    /// scope is completed.
    pub dump_symbols: bool,
}
