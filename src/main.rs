use std::fmt;
use std::io::{self, Write};

use clap::Parser;
use termion::color as term;

use lightness_palette::palette::{NamedColor, Saturation};
use lightness_palette::resolver::{
    BranchUpdate, LightnessResolver, Resolution, ResolveError, ResolverConfig, SearchStrategy,
};
use lightness_palette::tables::{self, SnailRow, TableRow};

/// Prints palette colors that match a target lightness.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    subcommand: Subcommands,
    #[command(flatten)]
    search: SearchArgs,
    #[command(flatten)]
    globals: GlobalArgs,
}

#[derive(Debug, clap::Args)]
struct GlobalArgs {
    /// Print debug information; can be repeated.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Do not print logs to console.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, clap::Args)]
struct SearchArgs {
    /// Bisect luminance instead of stepping through it, with the given number of iterations.
    #[arg(
        long,
        global = true,
        value_name = "ITERATIONS",
        num_args = 0..=1,
        default_missing_value = "32"
    )]
    bisect: Option<u32>,
    /// Luminance increment of the fixed-step search, with white at 100.
    #[arg(long, global = true, default_value_t = 0.2, conflicts_with = "bisect")]
    step: f64,
    /// Skip steps on the linear part of the lightness curve, like older palette tables.
    #[arg(long, global = true)]
    legacy_branch: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Subcommands {
    /// Print the palette constants as C defines.
    Defines(OutputArgs),
    /// Print every color at 10% to 50% lightness.
    Bar(OutputArgs),
    /// Print the stops of the lift and sink gradient.
    Snail(OutputArgs),
    /// Resolve a single color.
    Resolve(ResolveArgs),
}

#[derive(Debug, clap::Args)]
struct OutputArgs {
    /// Write CSV instead of source lines.
    #[arg(long)]
    csv: bool,
    /// Show a color swatch before each line.
    #[arg(long, conflicts_with = "csv")]
    swatch: bool,
}

#[derive(Debug, clap::Args)]
struct ResolveArgs {
    /// Palette color name.
    color: NamedColor,
    /// Target lightness in percent.
    #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
    percent: u8,
    /// Use the desaturated chromaticity.
    #[arg(long)]
    desaturated: bool,
    /// Show a color swatch.
    #[arg(long)]
    swatch: bool,
}

#[derive(Debug)]
enum Error {
    Resolve(ResolveError),
    WriteText(io::Error),
    WriteCsv(csv::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Resolve(e) => write!(f, "failed to resolve color: {e}"),
            Error::WriteText(e) => write!(f, "failed writing output: {e}"),
            Error::WriteCsv(e) => write!(f, "failed writing CSV: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Resolve(e) => Some(e),
            Error::WriteText(e) => Some(e),
            Error::WriteCsv(e) => Some(e),
        }
    }
}

fn main() -> std::process::ExitCode {
    let Args {
        subcommand,
        search,
        globals,
    } = Args::parse();

    if !globals.quiet {
        let filter = match globals.verbose {
            0 => tracing::level_filters::LevelFilter::INFO,
            1 => tracing::level_filters::LevelFilter::DEBUG,
            _ => tracing::level_filters::LevelFilter::TRACE,
        };
        let env_filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(filter.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(env_filter)
            .init();
    }

    let resolver = build_resolver(&search);
    let result = match subcommand {
        Subcommands::Defines(output) => tables::define_colors(&resolver)
            .map_err(Error::Resolve)
            .and_then(|rows| print_table(&rows, &output)),
        Subcommands::Bar(output) => tables::bar_table(&resolver)
            .map_err(Error::Resolve)
            .and_then(|rows| print_table(&rows, &output)),
        Subcommands::Snail(output) => tables::snail_table(&resolver)
            .map_err(Error::Resolve)
            .and_then(|entries| {
                let rows: Vec<SnailRow> = entries.into_iter().map(SnailRow::from).collect();
                print_table(&rows, &output)
            }),
        Subcommands::Resolve(args) => handle_resolve(&resolver, &args),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::ExitCode::FAILURE
    } else {
        std::process::ExitCode::SUCCESS
    }
}

fn build_resolver(search: &SearchArgs) -> LightnessResolver {
    let strategy = match search.bisect {
        Some(iterations) => SearchStrategy::Bisection { iterations },
        None => SearchStrategy::FixedStep { step: search.step },
    };
    let branch_update = if search.legacy_branch {
        BranchUpdate::CubeRootOnly
    } else {
        BranchUpdate::Always
    };
    let config = ResolverConfig {
        strategy,
        branch_update,
        ..ResolverConfig::default()
    };
    tracing::debug!(?config, "resolver configured");
    LightnessResolver::new(config)
}

fn swatch(rgb: (u8, u8, u8)) -> String {
    let (r, g, b) = rgb;
    format!("{}  {}", term::Bg(term::Rgb(r, g, b)), term::Bg(term::Reset))
}

fn print_table<T: TableRow>(rows: &[T], output: &OutputArgs) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if output.csv {
        tables::write_csv(&mut out, rows).map_err(Error::WriteCsv)
    } else if output.swatch {
        rows.iter()
            .try_for_each(|row| writeln!(out, "{} {}", swatch(row.rgb().int_rgb_tup()), row))
            .map_err(Error::WriteText)
    } else {
        tables::write_lines(&mut out, rows).map_err(Error::WriteText)
    }
}

fn handle_resolve(resolver: &LightnessResolver, args: &ResolveArgs) -> Result<(), Error> {
    let saturation = Saturation::from_flag(!args.desaturated);
    let point = args.color.chromaticity(saturation);
    let res = resolver
        .resolution(point, f64::from(args.percent) * 0.01)
        .map_err(Error::Resolve)?;
    if !res.reached {
        tracing::warn!(
            "{} cannot reach {}% lightness, lightest is {:.1}%",
            args.color,
            args.percent,
            res.hsl_lightness * 100.0
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.swatch {
        write!(out, "{} ", swatch(res.rgb.int_rgb_tup())).map_err(Error::WriteText)?;
    }
    write_resolution(&mut out, &res).map_err(Error::WriteText)
}

fn write_resolution(out: &mut impl Write, res: &Resolution) -> io::Result<()> {
    let (r, g, b) = res.rgb.int_rgb_tup();
    writeln!(out, "{}", res.rgb)?;
    writeln!(out, "  rgb:            {} {} {}", r, g, b)?;
    writeln!(out, "  hsl lightness:  {:.4}", res.hsl_lightness)?;
    writeln!(
        out,
        "  L*u*v*:         {:.3} {:.3} {:.3}",
        res.luv.l, res.luv.u, res.luv.v
    )?;
    writeln!(out, "  luminance:      {:.1}", res.luminance)?;
    writeln!(out, "  reached:        {}", res.reached)
}
