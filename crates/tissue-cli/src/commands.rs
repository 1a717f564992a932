use std::path::Path;

use anyhow::Result;
use tracing::{info, info_span};

use tissue_cli::formats::{
    CatalogFormat, import_list, load_catalog, load_hierarchy, save_catalog,
};
use tissue_cli::summary::{import_summary, print_catalog};
use tissue_core::TissueSession;
use tissue_model::HierarchyItem;

use crate::cli::{ConvertArgs, DefaultsArgs, FormatArg, ImportArgs, ShowArgs};

/// Version used when writing binary and readable lists without an explicit one.
const WRITE_VERSION: u16 = 5;

pub fn run_defaults(args: &DefaultsArgs) -> Result<()> {
    let format = explicit(args.format)
        .or_else(|| CatalogFormat::from_path(&args.output))
        .unwrap_or(CatalogFormat::DefaultList);
    let session = TissueSession::new();
    save_catalog(&session, &args.output, format, WRITE_VERSION, None)?;
    println!(
        "Wrote {} default tissues to {} ({})",
        session.catalog().count(),
        args.output.display(),
        format.name()
    );
    Ok(())
}

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let format = CatalogFormat::resolve(explicit(args.format), &args.input)?;
    let session = load_catalog(&args.input, format, args.stream_version)?;
    print_catalog(session.catalog());
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let span = info_span!("convert", input = %args.input.display(), output = %args.output.display());
    let _guard = span.enter();

    let from = CatalogFormat::resolve(explicit(args.from), &args.input)?;
    let to = CatalogFormat::resolve(explicit(args.to), &args.output)?;
    let hierarchy: Option<HierarchyItem> = args
        .hierarchy
        .as_deref()
        .map(load_hierarchy)
        .transpose()?;

    let session = load_catalog(&args.input, from, args.stream_version)?;
    save_catalog(
        &session,
        &args.output,
        to,
        args.write_version,
        hierarchy.as_ref(),
    )?;
    info!(from = from.name(), to = to.name(), "converted tissue list");
    println!(
        "Converted {} tissues: {} -> {}",
        session.catalog().count(),
        from.name(),
        to.name()
    );
    Ok(())
}

pub fn run_import(args: &ImportArgs) -> Result<()> {
    let span = info_span!("import", base = %args.base.display(), list = %args.list.display());
    let _guard = span.enter();

    let format = CatalogFormat::resolve(explicit(args.format), &args.base)?;
    let mut session = load_catalog(&args.base, format, args.stream_version)?;
    let report = import_list(&mut session, &args.list, args.purge)?;

    let output = args.output.as_deref().unwrap_or(&args.base);
    save_catalog(&session, output, format, WRITE_VERSION, None)?;
    print!("{}", import_summary(&report, session.catalog()));
    if args.purge && report.removed_range > 0 {
        println!("Removed {} carried-over tissues", report.removed_range);
    }
    print_written(output, format);
    Ok(())
}

fn print_written(path: &Path, format: CatalogFormat) {
    println!("Wrote {} ({})", path.display(), format.name());
}

fn explicit(arg: Option<FormatArg>) -> Option<CatalogFormat> {
    arg.map(CatalogFormat::from)
}
