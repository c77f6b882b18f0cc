use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use eda_charts::models::{CategoryTable, FeatureFrame, mfcc_column};
use eda_charts::viz::{BarChartOptions, GridOptions, KdeOptions, SingleBoxplotOptions};
use eda_charts::{stats, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "eda-charts",
    version,
    about = "Render example EDA charts: stacked bars, KDE overlays & boxplots"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every chart kind from a built-in sample dataset.
    Demo(DemoArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum ImageFormat {
    Svg,
    Png,
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Directory the chart files are written into (created if missing).
    #[arg(long, default_value = "charts")]
    out_dir: PathBuf,
    /// Output image format.
    #[arg(long, value_enum, default_value = "svg")]
    format: ImageFormat,
    /// Width of the bar/KDE charts (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the bar/KDE charts (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Print grouped statistics of the sample features to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

/// Sample wide table: emotion-pair rows, genre columns, occurrence counts.
fn demo_table() -> Result<CategoryTable> {
    let table = CategoryTable::new(
        vec![
            "angry_sad".into(),
            "happy_calm".into(),
            "fearful_disgust".into(),
        ],
        vec![
            "blues".into(),
            "classical".into(),
            "jazz".into(),
            "metal".into(),
            "pop".into(),
        ],
        vec![
            vec![14.0, 3.0, 7.0, 22.0, 9.0],
            vec![6.0, 18.0, 12.0, 0.0, 16.0],
            vec![10.0, 5.0, 0.0, 13.0, 4.0],
        ],
    )?;
    Ok(table.with_column_axis_name("genre"))
}

/// Sample long-form frame: four MFCC mean columns over three emotion pairs,
/// deterministic values with one high observation per group.
fn demo_frame() -> Result<FeatureFrame> {
    const GROUPS: [(&str, f64); 3] = [
        ("angry_sad", -1.2),
        ("happy_calm", 0.4),
        ("fearful_disgust", 1.1),
    ];
    let mut labels: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); 4];
    for (name, base) in GROUPS {
        for i in 0..12usize {
            labels.push(name.to_string());
            for (c, col) in columns.iter_mut().enumerate() {
                let wiggle = ((i * 7 + c * 3) % 11) as f64 / 11.0 - 0.5;
                let spike = if i == 11 { 1.8 } else { 0.0 };
                col.push(base + c as f64 * 0.6 + wiggle + spike);
            }
        }
    }

    let mut frame = FeatureFrame::new();
    for (c, values) in columns.into_iter().enumerate() {
        frame.push_numeric(mfcc_column(c + 1, "mean"), values)?;
    }
    frame.push_labels("emotion_pair", labels)?;
    Ok(frame)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
    }
}

fn cmd_demo(args: DemoArgs) -> Result<()> {
    std::fs::create_dir_all(&args.out_dir)?;
    let ext = match args.format {
        ImageFormat::Svg => "svg",
        ImageFormat::Png => "png",
    };

    let table = demo_table()?;
    let frame = demo_frame()?;

    let bar_path = args.out_dir.join(format!("stacked_counts.{ext}"));
    viz::stacked_barplot(
        &table,
        &bar_path,
        &BarChartOptions {
            title: "Emotion pairs by genre".into(),
            xlabel: "emotion pair".into(),
            figsize: (args.width, args.height),
            ..BarChartOptions::default()
        },
    )?;
    eprintln!("Wrote {}", bar_path.display());

    let kde_path = args.out_dir.join(format!("kde_mfcc_1_mean.{ext}"));
    viz::plot_kde(
        &frame,
        "mfcc_1_mean",
        "emotion_pair",
        &kde_path,
        &KdeOptions {
            figsize: (args.width, args.height),
            ..KdeOptions::default()
        },
    )?;
    eprintln!("Wrote {}", kde_path.display());

    let grid_path = args.out_dir.join(format!("mfcc_boxplots.{ext}"));
    viz::plot_mfcc_boxplots(
        &frame,
        &[1, 2, 3, 4],
        "mean",
        "emotion_pair",
        (2, 2),
        &grid_path,
        &GridOptions::default(),
    )?;
    eprintln!("Wrote {}", grid_path.display());

    let single_path = args.out_dir.join(format!("single_boxplot.{ext}"));
    viz::plot_single_boxplot(
        &frame,
        "mfcc_2_mean",
        "emotion_pair",
        &single_path,
        &SingleBoxplotOptions::default(),
    )?;
    eprintln!("Wrote {}", single_path.display());

    if args.stats {
        for col in [1, 2, 3, 4].map(|n| mfcc_column(n, "mean")) {
            for s in stats::grouped_summary(&frame, &col, "emotion_pair")? {
                println!(
                    "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
                    col,
                    s.group,
                    s.count,
                    s.missing,
                    fmt_opt(s.min),
                    fmt_opt(s.max),
                    fmt_opt(s.mean),
                    fmt_opt(s.median)
                );
            }
        }
    }

    Ok(())
}
