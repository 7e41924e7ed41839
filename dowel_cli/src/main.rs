//! # Dowel Connection CLI
//!
//! Terminal interface for single-fastener lateral design values.
//!
//! ```bash
//! dowel_cli dowel 0.5                                  # defaults: 1.5" DF-L members
//! dowel_cli bolt 0.75 --tm 3.5 --ts 0.25 --side A36    # tabulated bolt, steel side plate
//! dowel_cli evaluate connection.json --angle 0 --angle 90 --format json
//! dowel_cli bolts                                      # list the bolt table
//! ```
//!
//! Set `RUST_LOG=dowel_core=trace` (or pass `--verbose`) to see every yield
//! mode as it is evaluated.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use dowel_core::calculations::{CapacityResult, DowelConnection, DowelConnectionInput};
use dowel_core::units::{Degrees, Ksi, Psi};
use dowel_core::{
    BoltOptions, BoltTable, CalcError, CalcResult, ConnectionFactory, DowelOptions, MaterialSpec,
};

#[derive(Parser)]
#[command(name = "dowel_cli")]
#[command(author, version, about = "Dowel-type fastener lateral capacity (NDS yield limit equations)")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Load angle to grain in degrees; repeat for several angles
    #[arg(long, short = 'a', global = true, default_value = "90")]
    angle: Vec<f64>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a connection described by a JSON file
    Evaluate {
        /// Path to a DowelConnectionInput JSON document
        path: PathBuf,
    },

    /// Evaluate a generic dowel
    Dowel {
        /// Nominal diameter (in)
        diameter: f64,

        #[command(flatten)]
        members: MemberArgs,

        /// Root diameter (in); omit for a full diameter dowel
        #[arg(long)]
        dr: Option<f64>,

        /// Bending yield strength Fyb (psi)
        #[arg(long, default_value = "45000")]
        fyb: f64,

        /// Unit withdrawal design value (lb/in)
        #[arg(long)]
        withdrawal: Option<f64>,
    },

    /// Evaluate a tabulated A307 bolt
    Bolt {
        /// Nominal diameter (in), must match the table exactly
        diameter: f64,

        #[command(flatten)]
        members: MemberArgs,
    },

    /// List the bolt table
    Bolts,
}

#[derive(clap::Args)]
struct MemberArgs {
    /// Main member thickness (in)
    #[arg(long, default_value = "1.5")]
    tm: f64,

    /// Side member thickness (in)
    #[arg(long, default_value = "1.5")]
    ts: f64,

    /// Material for both members (e.g., DFL, SP, A36, 0.43)
    #[arg(long, short = 'm', default_value = "DFL")]
    material: String,

    /// Main member material, overrides --material
    #[arg(long)]
    main: Option<String>,

    /// Side member material, overrides --material
    #[arg(long)]
    side: Option<String>,

    /// Bear on the full outer diameter
    #[arg(long)]
    full_diameter: bool,

    /// Two side members
    #[arg(long)]
    double_shear: bool,
}

impl MemberArgs {
    fn material_spec(&self) -> MaterialSpec {
        match (&self.main, &self.side) {
            (None, None) => MaterialSpec::Same(self.material.clone()),
            (main, side) => MaterialSpec::pair(
                main.as_deref().unwrap_or(&self.material),
                side.as_deref().unwrap_or(&self.material),
            ),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if cli.format == OutputFormat::Json {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> CalcResult<()> {
    match &cli.command {
        Commands::Evaluate { path } => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CalcError::invalid_input("path", path.display().to_string(), e.to_string())
            })?;
            let input: DowelConnectionInput = serde_json::from_str(&text)?;
            tracing::info!(path = %path.display(), label = %input.label, "evaluating connection");
            report(&DowelConnection::new(&input)?, cli)
        }
        Commands::Dowel {
            diameter,
            members,
            dr,
            fyb,
            withdrawal,
        } => {
            let factory = ConnectionFactory::nds()?;
            let options = DowelOptions {
                material: members.material_spec(),
                dr_in: *dr,
                fyb_psi: *fyb,
                tm_in: members.tm,
                ts_in: members.ts,
                w_lb_per_in: *withdrawal,
                full_diameter: members.full_diameter,
                double_shear: members.double_shear,
                ..DowelOptions::default()
            };
            report(&factory.dowel(*diameter, &options)?, cli)
        }
        Commands::Bolt { diameter, members } => {
            let factory = ConnectionFactory::nds()?;
            let options = BoltOptions {
                material: members.material_spec(),
                full_diameter: members.full_diameter,
                double_shear: members.double_shear,
            };
            report(&factory.bolt(*diameter, members.tm, members.ts, &options)?, cli)
        }
        Commands::Bolts => list_bolts(cli.format),
    }
}

fn report(connection: &DowelConnection, cli: &Cli) -> CalcResult<()> {
    let results = cli
        .angle
        .iter()
        .map(|&theta| connection.analyze(Degrees(theta)))
        .collect::<CalcResult<Vec<CapacityResult>>>()?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Text => {
            print_connection(connection);
            for result in &results {
                print_result(result);
            }
        }
    }
    Ok(())
}

fn print_connection(c: &DowelConnection) {
    println!("═══════════════════════════════════════");
    println!("  DOWEL CONNECTION");
    println!("═══════════════════════════════════════");
    if !c.label().is_empty() {
        println!("  Label:      {}", c.label());
    }
    println!("  D:          {}", c.diameter());
    println!("  Dr:         {}", c.root_diameter());
    println!(
        "  D (eff):    {:.4} in ({})",
        c.effective_diameter(),
        if c.is_full_diameter() { "full diameter" } else { "root diameter" }
    );
    println!("  lm / ls:    {} / {}", c.main_length(), c.side_length());
    println!("  Main:       {}", c.main_bearing());
    println!("  Side:       {}", c.side_bearing());
    println!("  Fyb:        {}", Ksi::from(c.fyb()));
    println!("  Shear:      {}", c.shear_configuration());
}

fn print_result(r: &CapacityResult) {
    println!();
    println!("θ = {}°", r.theta_deg);
    println!(
        "  Fem = {}  Fes = {}  Re = {:.3}  Rt = {:.3}",
        Psi(r.terms.fem_psi),
        Psi(r.terms.fes_psi),
        r.terms.re,
        r.terms.rt
    );
    for m in &r.modes {
        let marker = if m.mode == r.governing_mode { "<- governs" } else { "" };
        if m.multiplier == 1.0 {
            println!("  Z{:<5} {:>10.1} lb  {}", m.mode.label(), m.capacity_lb, marker);
        } else {
            println!(
                "  Z{:<5} {:>10.1} lb  ({:.0} x {:.1}) {}",
                m.mode.label(),
                m.capacity_lb,
                m.multiplier,
                m.z_lb,
                marker
            );
        }
    }
    println!("───────────────────────────────────────");
    println!("  Z = {:.1} lb  (governs: {})", r.capacity_lb, r.governing_condition());
    match r.withdrawal_lb {
        Some(w) => println!("  W = {:.1} lb", w),
        None => println!("  W = n/a"),
    }
}

fn list_bolts(format: OutputFormat) -> CalcResult<()> {
    let table = BoltTable::nds_a307()?;
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = table.records().collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            println!("Bolts ({})", table.version());
            println!("  {:<8} {:>7} {:>7} {:>8}", "NAME", "D", "DR", "FYB");
            for row in table.records() {
                println!(
                    "  {:<8} {:>7.4} {:>7.3} {:>8.0}",
                    row.name, row.d_in, row.dr_in, row.fyb_psi
                );
            }
        }
    }
    Ok(())
}
