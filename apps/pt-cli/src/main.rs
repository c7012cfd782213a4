use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use pt_app::{
    AppError, AppResult, RunOptions, SimulateResponse, compile_config, load_project, load_series,
    preset_config, project_from_config, run_options, run_simulation_with_progress, save_project,
};
use pt_project::PresetDef;
use pt_sim::{PipeConfig, SimProgress, ThermalTransportIntegrator};

#[derive(Parser)]
#[command(name = "pipetherm")]
#[command(about = "Pipetherm - transient heat transport along a single pipe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the outlet temperature for a measured inlet series
    Simulate {
        /// Series file (.csv, .txt or .json request body)
        series: PathBuf,
        /// Project file describing the pipe
        #[arg(long)]
        project: Option<PathBuf>,
        /// Built-in model preset, used when no project is given
        #[arg(long, value_enum, conflicts_with = "project")]
        preset: Option<Preset>,
        /// Sample interval in seconds (overrides project and series file)
        #[arg(long)]
        interval: Option<f64>,
        /// Write results to this file instead of printing a table
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Result format; inferred from the output extension when omitted
        #[arg(long, value_enum)]
        format: Option<Format>,
        /// Do not render the progress line
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show geometry, stability bounds and the sub-step plan
    Plan {
        /// Project file describing the pipe
        #[arg(long)]
        project: Option<PathBuf>,
        /// Built-in model preset, used when no project is given
        #[arg(long, value_enum, conflicts_with = "project")]
        preset: Option<Preset>,
        /// Sample interval in seconds
        #[arg(long)]
        interval: f64,
    },
    /// Validate project file syntax and values
    Validate {
        /// Path to the project file (.yaml, .yml or .json)
        project_path: PathBuf,
    },
    /// Write a project template listing every parameter
    Init {
        /// Destination project file (.yaml, .yml or .json)
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = Preset::WallExchange)]
        preset: Preset,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    WallExchange,
    TransportOnly,
}

impl From<Preset> for PresetDef {
    fn from(p: Preset) -> Self {
        match p {
            Preset::WallExchange => PresetDef::WallExchange,
            Preset::TransportOnly => PresetDef::TransportOnly,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            series,
            project,
            preset,
            interval,
            output,
            format,
            quiet,
        } => cmd_simulate(
            &series,
            project.as_deref(),
            preset,
            interval,
            output.as_deref(),
            format,
            quiet,
        ),
        Commands::Plan {
            project,
            preset,
            interval,
        } => cmd_plan(project.as_deref(), preset, interval),
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Init {
            path,
            preset,
            force,
        } => cmd_init(&path, preset, force),
    }
}

/// Engine configuration and run options from a project file or a preset.
fn resolve_config(
    project: Option<&Path>,
    preset: Option<Preset>,
) -> AppResult<(PipeConfig, RunOptions)> {
    match project {
        Some(path) => {
            let project = load_project(path)?;
            Ok((compile_config(&project)?, run_options(&project)))
        }
        None => {
            let preset = preset.unwrap_or(Preset::WallExchange);
            Ok((preset_config(preset.into()), RunOptions::default()))
        }
    }
}

fn cmd_simulate(
    series: &Path,
    project: Option<&Path>,
    preset: Option<Preset>,
    interval: Option<f64>,
    output: Option<&Path>,
    format: Option<Format>,
    quiet: bool,
) -> AppResult<()> {
    let (config, options) = resolve_config(project, preset)?;
    let mut request = load_series(series)?;
    if interval.is_some() {
        request.interval_s = interval;
    }

    // Data printed to stdout must not be interleaved with the progress line
    let show_progress = !quiet && (output.is_some() || format.is_none());

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let mut on_progress = |p: SimProgress| {
        let fraction = p.fraction_complete();
        if (fraction - last_fraction).abs() >= 0.005 || last_emit.elapsed().as_millis() >= 100 {
            render_cli_progress(&p);
            last_fraction = fraction;
            last_emit = Instant::now();
        }
    };
    let progress: Option<&mut dyn FnMut(SimProgress)> = if show_progress {
        Some(&mut on_progress)
    } else {
        None
    };

    let started = Instant::now();
    let response = run_simulation_with_progress(&config, &request, &options, progress)?;
    if show_progress {
        clear_progress_line();
    }

    for warning in &response.warnings {
        eprintln!("warning: {}", warning);
    }

    match (output, format) {
        (Some(path), format) => {
            let format = format.unwrap_or_else(|| format_for(path));
            let content = render(&response, format)?;
            std::fs::write(path, content).map_err(|e| AppError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
            println!(
                "✓ Wrote {} samples to {} ({:.2}s)",
                response.outlet.len(),
                path.display(),
                started.elapsed().as_secs_f64()
            );
        }
        (None, Some(format)) => print!("{}", render(&response, format)?),
        (None, None) => print_table(&response, started.elapsed().as_secs_f64()),
    }
    Ok(())
}

fn format_for(path: &Path) -> Format {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Format::Csv,
        _ => Format::Json,
    }
}

fn render(response: &SimulateResponse, format: Format) -> AppResult<String> {
    match format {
        Format::Json => response.to_json_pretty(),
        Format::Csv => Ok(response.to_csv()),
    }
}

fn print_table(response: &SimulateResponse, elapsed_s: f64) {
    println!("✓ Simulation completed ({:.2}s)", elapsed_s);
    println!(
        "  Interval: {:.3} s, {} sub-steps of {:.4} s",
        response.interval_s, response.substeps_per_sample, response.substep_s
    );
    println!(
        "\n{:>10}  {:>9}  {:>9}  {:>9}",
        "time_s", "inlet_c", "ambient_c", "outlet_c"
    );
    for (t, inlet, ambient, out) in response.rows() {
        println!(
            "{:>10.1}  {:>9.2}  {:>9.2}  {:>9.2}",
            t, inlet, ambient, out
        );
    }
    match response.final_temperature {
        Some(t) => println!("\nFinal outlet: {:.2} °C", t),
        None => println!("\nNo samples simulated"),
    }
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(p: &SimProgress) {
    let width = 28usize;
    let fraction = p.fraction_complete();
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  sample={}/{}  t={:.1}s  outlet={:.2}°C",
        bar,
        fraction * 100.0,
        p.sample,
        p.total_samples,
        p.sim_time_s,
        p.outlet_c
    );
    let _ = io::stdout().flush();
}

fn cmd_plan(project: Option<&Path>, preset: Option<Preset>, interval: f64) -> AppResult<()> {
    let (config, _) = resolve_config(project, preset)?;
    let integrator = ThermalTransportIntegrator::new(config)?;
    let interval = pt_app::validate_interval(interval)?;
    let plan = integrator.plan(interval)?;
    let cfg = integrator.config();
    let geom = integrator.geometry();

    println!("Pipe:");
    println!(
        "  Length: {:.3} m, inner radius: {:.4} m, wall: {:.4} m",
        cfg.length_m, cfg.inner_radius_m, cfg.wall_thickness_m
    );
    println!(
        "  Cells: {} (dx = {:.4} m), velocity: {:.3} m/s, transit: {:.2} s",
        cfg.cells,
        geom.dx,
        cfg.velocity_m_per_s,
        cfg.transit_time_s()
    );
    println!("\nPer-cell capacities:");
    println!("  Fluid: {:.4} J/K", geom.fluid_capacity);
    println!("  Wall:  {:.4} J/K", geom.wall_capacity);
    println!("  Thermal diffusivity: {:.3e} m²/s", geom.diffusivity);

    println!("\nStability bounds:");
    println!("  Advective (dx/v):       {:.5} s", plan.bounds.advective_s);
    match plan.bounds.diffusive_s {
        Some(d) => println!("  Diffusive (dx²/2α):     {:.5} s", d),
        None => println!("  Diffusive:              off"),
    }
    println!(
        "  Max step (x{:.2}):       {:.5} s",
        cfg.numerics.safety_factor, plan.max_step_s
    );

    println!("\nSub-step plan for {:.3} s samples:", plan.interval_s);
    println!("  Sub-steps per sample: {}", plan.substeps);
    println!("  Sub-step:             {:.5} s", plan.substep_s);
    println!("  Courant number:       {:.3}", plan.courant());
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load_project(project_path)?;
    let config = compile_config(&project)?;
    println!("✓ Project is valid");
    println!(
        "  {} - {} cells over {:.3} m, transit {:.2} s",
        project.name,
        config.cells,
        config.length_m,
        config.transit_time_s()
    );
    Ok(())
}

fn cmd_init(path: &Path, preset: Preset, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("pipe")
        .to_string();
    let preset = PresetDef::from(preset);
    let project = project_from_config(&name, preset, &preset_config(preset));
    save_project(path, &project)?;
    println!("✓ Wrote project template to {}", path.display());
    Ok(())
}
