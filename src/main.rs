use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kira_myeloclass::cli::{Cli, Commands, RulesCommand, RulesShowArgs};
use kira_myeloclass::ctx::{Ctx, FamilySelection, InputFormat};
use kira_myeloclass::engine;
use kira_myeloclass::engine::taxonomy::Family;
use kira_myeloclass::io;
use kira_myeloclass::pipeline::Pipeline;
use kira_myeloclass::pipeline::stage1_input::Stage1Input;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify(args) => {
            if InputFormat::detect(&args.input) == InputFormat::JsonLines {
                anyhow::bail!("--input is a multi-record file; use the batch command");
            }
            let mut ctx = Ctx::new(
                args.input,
                args.out,
                args.taxonomy.taxonomies(),
                args.family.selection(),
                args.json,
                args.tsv,
                args.dot,
            );
            ctx.run_mode = args.run_mode.run_mode();
            Pipeline::classify().run(&mut ctx)?;
            print!("{}", io::summary::format_summary(&ctx, args.explain)?);
        }
        Commands::Batch(args) => {
            if InputFormat::detect(&args.input) != InputFormat::JsonLines {
                anyhow::bail!("batch --input must be .jsonl or .ndjson (optionally .gz)");
            }
            let mut ctx = Ctx::new(
                args.input,
                args.out,
                args.taxonomy.taxonomies(),
                args.family.selection(),
                true,
                true,
                false,
            );
            ctx.threads = args.threads;
            ctx.run_mode = args.run_mode.run_mode();
            Pipeline::classify().run(&mut ctx)?;
            print!("{}", io::summary::format_summary(&ctx, false)?);
        }
        Commands::Validate(args) => {
            let mut ctx = Ctx::new(
                args.input,
                PathBuf::from("."),
                Vec::new(),
                FamilySelection::Auto,
                false,
                false,
                false,
            );
            let pipeline = Pipeline::new(vec![Box::new(Stage1Input::new())]);
            pipeline.run(&mut ctx)?;
            print_validate_summary(&ctx);
        }
        Commands::Rules(args) => match args.command {
            RulesCommand::Show(show) => print_rules(&show),
        },
    }

    Ok(())
}

fn print_validate_summary(ctx: &Ctx) {
    println!("kira-myeloclass validate ok");
    println!("cases: {}", ctx.cases.len());
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}

fn print_rules(args: &RulesShowArgs) {
    let families = match args.family.map(|f| f.selection()) {
        Some(FamilySelection::Fixed(family)) => vec![family],
        _ => vec![Family::Aml, Family::Mds],
    };
    for taxonomy in args.taxonomy.taxonomies() {
        for &family in &families {
            println!("{} {} rules:", taxonomy.name(), family.name());
            for (i, name) in engine::rule_table(taxonomy, family).iter().enumerate() {
                println!("{}\t{}", i + 1, name);
            }
        }
        let profile = taxonomy.profile();
        println!(
            "{} AML-defining abnormalities (acute-only below {}% blasts are not AML-defining):",
            taxonomy.name(),
            profile.acute_blast_threshold
        );
        for entry in profile.aml_defining {
            let marker = if entry.acute_only { "acute-only" } else { "-" };
            println!("{}\t{}\t{}", entry.key, marker, entry.label);
        }
    }
}
