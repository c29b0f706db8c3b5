mod timings;
mod xml;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use jackc_bytecode::{
    compiler::{CompileResult, Compiler},
    config::CompileConfig,
    instr::prog_to_string,
};
use jackc_err::err::JackErr;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};
use timings::Timings;
use xml::XmlObserver;

#[derive(Parser, Debug)]
#[command(name = "jackc", author, version, about)]
pub struct JackcOpts {
    /// A .jack file, or a directory containing .jack files
    path: PathBuf,
    /// Write output files here instead of next to each source file
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Also write a <Name>.xml parse tree for each unit
    #[arg(long)]
    xml: bool,
    /// Start each output file with a comment naming its source
    #[arg(long)]
    header: bool,
    /// Log symbol tables at debug level
    #[arg(long)]
    dump_symbols: bool,
    /// Write <Name>.vm.partial with the output emitted before a failure
    #[arg(long)]
    keep_partial: bool,
    #[arg(long)]
    timings: bool,
    /// Increase log verbosity, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let opts = JackcOpts::parse();

    match run(&opts) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("jackc: exiting due to errors");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("jackc: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Compiles every unit found at the input path. Returns false if any unit
/// failed; failures don't stop the remaining units from compiling.
fn run(opts: &JackcOpts) -> Result<bool> {
    let level = match opts.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new()
        .with_level(level)
        .env()
        .init()
        .context("could not initialize logger")?;

    let sources = find_sources(&opts.path)?;
    let conf = CompileConfig {
        header_comment: opts.header,
        dump_symbols: opts.dump_symbols,
    };

    let mut timings = Timings::default();
    let exec_start = Instant::now();
    let failed = compile_units(&sources, &conf, opts, &mut timings);
    timings.total_time = exec_start.elapsed();
    if opts.timings {
        timings.emit();
    }

    info!(
        "compiled {} of {} units",
        sources.len() - failed,
        sources.len()
    );
    Ok(failed == 0)
}

/// Compiles each unit on its own and returns how many failed. A unit that
/// can't be read or written is reported and counted like a compile error.
fn compile_units(
    sources: &[PathBuf],
    conf: &CompileConfig,
    opts: &JackcOpts,
    timings: &mut Timings,
) -> usize {
    let mut failed = 0;

    for src in sources {
        let unit_start = Instant::now();
        match compile_unit(src, conf, opts) {
            Ok(true) => {}
            Ok(false) => failed += 1,
            Err(e) => {
                eprintln!("jackc: {:#}", e);
                failed += 1;
            }
        }
        timings.record(&src.display().to_string(), unit_start.elapsed());
    }

    failed
}

/// A file must have the .jack extension. A directory is scanned, not
/// recursively, and its .jack files are returned in sorted order.
fn find_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if !is_jack_file(path) {
            bail!("file '{}' does not have the extension '.jack'", path.display());
        }
        return Ok(vec![path.to_path_buf()]);
    }

    let entries = fs::read_dir(path)
        .with_context(|| format!("could not read directory '{}'", path.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry_path = entry?.path();
        if entry_path.is_file() && is_jack_file(&entry_path) {
            sources.push(entry_path);
        }
    }
    sources.sort();

    if sources.is_empty() {
        bail!("no .jack files found in '{}'", path.display());
    }

    Ok(sources)
}

fn is_jack_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "jack")
}

/// Compiles one unit and writes its outputs. Returns false if the unit had a
/// compile error, which has already been emitted.
fn compile_unit(src: &Path, conf: &CompileConfig, opts: &JackcOpts) -> Result<bool> {
    let infile =
        File::open(src).with_context(|| format!("could not open file '{}'", src.display()))?;

    info!("compiling {}...", src.display());

    let mut obs = XmlObserver::new();
    let comp = Compiler::new(infile, conf.clone());
    let result: CompileResult = match opts.xml {
        true => comp.with_observer(&mut obs).compile(),
        false => comp.compile(),
    };

    let stem = src
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let out_dir = match &opts.out_dir {
        Some(dir) => dir.clone(),
        None => src.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    if opts.xml {
        write_output(&out_dir.join(format!("{}.xml", stem)), &obs.finish())?;
    }

    match result.err {
        Some(ref e) => {
            e.emit();
            if opts.keep_partial {
                let partial = out_dir.join(format!("{}.vm.partial", stem));
                write_output(&partial, &prog_to_string(&result.program))?;
            }
            Ok(false)
        }
        None => {
            write_output(
                &out_dir.join(format!("{}.vm", stem)),
                &prog_to_string(&result.program),
            )?;
            Ok(true)
        }
    }
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("could not write '{}'", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("jackc-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_write_failure_keeps_batch_going() {
        let src_dir = scratch_dir("batch-src");
        let out_dir = scratch_dir("batch-out");
        fs::write(src_dir.join("A.jack"), "class A { }").unwrap();
        fs::write(src_dir.join("B.jack"), "class B { }").unwrap();

        // A directory in the way makes writing A.vm fail.
        fs::create_dir(out_dir.join("A.vm")).unwrap();

        let opts = JackcOpts::parse_from([
            "jackc",
            src_dir.to_str().unwrap(),
            "--out-dir",
            out_dir.to_str().unwrap(),
        ]);
        let sources = find_sources(&opts.path).unwrap();
        let mut timings = Timings::default();

        let failed = compile_units(&sources, &CompileConfig::default(), &opts, &mut timings);

        assert_eq!(failed, 1);
        assert_eq!(timings.unit_times.len(), 2);
        assert!(out_dir.join("B.vm").is_file());

        fs::remove_dir_all(&src_dir).unwrap();
        fs::remove_dir_all(&out_dir).unwrap();
    }

    #[test]
    fn test_missing_sources_fail_invocation() {
        let dir = scratch_dir("empty");
        assert!(find_sources(&dir).is_err());
        assert!(find_sources(&dir.join("Nope.txt")).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
