use crate::{
    cli::{Args, Command},
    compiler::Language,
    paths::normalize,
    settings::SettingsError,
    Settings,
};
use anyhow::Context;
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

pub fn run(args: Args, out: &mut impl Write) -> anyhow::Result<()> {
    let config_path = args.config_path.as_path();
    let settings = match Settings::load(Some(config_path)) {
        Ok(settings) => settings,
        Err(SettingsError::Invalid(errors)) if args.command == Command::Check => {
            for error in &errors.0 {
                writeln!(out, "error: {}", error)?;
            }
            anyhow::bail!("configuration has {} error(s)", errors.0.len());
        }
        Err(err) => return Err(err).context("loading configuration"),
    };
    let root = Settings::project_root(Some(config_path)).context("resolving project root")?;

    match args.command {
        Command::Show { format } => {
            let rendered = settings
                .render(format)
                .with_context(|| format!("rendering configuration as {}", format))?;
            write!(out, "{}", rendered)?;
        }
        Command::Check => writeln!(out, "ok")?,
        Command::Paths => {
            let paths = settings.resolved_paths(&root);
            writeln!(out, "root: {}", paths.root.display())?;
            writeln!(out, "artifacts: {}", paths.artifacts.display())?;
            writeln!(out, "cache: {}", paths.cache.display())?;
            writeln!(out, "sources: {}", paths.sources.display())?;
            writeln!(out, "tests: {}", paths.tests.display())?;
        }
        Command::Compilers => {
            let mut solidity: Vec<_> = settings.solidity.versions().collect();
            solidity.sort();
            let mut vyper: Vec<_> = settings.vyper.versions().collect();
            vyper.sort();
            for (language, versions) in [(Language::Solidity, solidity), (Language::Vyper, vyper)] {
                let versions: Vec<_> = versions.iter().map(ToString::to_string).collect();
                writeln!(out, "{}: {}", language, versions.join(", "))?;
            }
        }
        Command::Select { files } => {
            let failed = select_files(&settings, &root, files, out)?;
            if failed > 0 {
                anyhow::bail!("no compiler selected for {} file(s)", failed);
            }
        }
        Command::Scan => {
            let sources = settings.resolved_paths(&root).sources;
            let files = source_files(&sources)?;
            log::info!("found {} sources in {}", files.len(), sources.display());
            let failed = select_files(&settings, &root, files, out)?;
            if failed > 0 {
                anyhow::bail!("no compiler selected for {} file(s)", failed);
            }
        }
    }
    Ok(())
}

/// Prints the selected compiler per file and returns how many selections failed.
fn select_files(
    settings: &Settings,
    root: &Path,
    files: Vec<PathBuf>,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let current_dir = std::env::current_dir().context("resolving current directory")?;
    let mut failed = 0;
    for file in files {
        // `root` is absolute, overrides are keyed relative to it
        let file = normalize(&current_dir.join(file));
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        let relative = file.strip_prefix(root).unwrap_or(&file);
        match settings.select_compiler(relative, &content) {
            Ok(compiler) => writeln!(out, "{}: {}", relative.display(), compiler)?,
            Err(err) => {
                failed += 1;
                writeln!(out, "{}: error: {}", relative.display(), err)?;
            }
        }
    }
    Ok(failed)
}

fn source_files(sources: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(sources).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", sources.display()))?;
        if entry.file_type().is_file() && Language::from_path(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
