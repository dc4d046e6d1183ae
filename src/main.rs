use avatarize::imaging::RustBackend;
use avatarize::{config, output, process};
use clap::Parser;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup — trivial, called exactly once
        Box::leak(format!("{}+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "avatarize")]
#[command(about = "Derive fixed-size avatar assets from a portrait image")]
#[command(long_about = "\
Derive fixed-size avatar assets from a portrait image

One image in, three files out:

  <output_dir>/
  ├── <stem>_small.png     # 64×64, Lanczos3, PNG at max compression
  ├── <stem>_small.webp    # the same 64×64 bitmap, WebP quality 85
  └── <stem>_medium.png    # 128×128 from the original

Defaults reproduce the stock invocation (the portfolio author image) and can
be overridden by an avatar.toml in the working directory or by the flags
below. Flags win over the config file.

Run 'avatarize --gen-config' to print a documented avatar.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Source portrait image (overrides config)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory for the derived assets (overrides config)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Config file (default: ./avatar.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Edge length of the small PNG + WebP variants (overrides config)
    #[arg(long)]
    small_size: Option<u32>,

    /// Edge length of the medium PNG variant (overrides config)
    #[arg(long)]
    medium_size: Option<u32>,

    /// WebP quality 1-100 (overrides config)
    #[arg(long)]
    webp_quality: Option<u32>,

    /// Print the run report as JSON instead of progress lines
    #[arg(long)]
    json: bool,

    /// Print a stock avatar.toml with all options documented
    #[arg(long)]
    gen_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let loaded = match &cli.config {
        Some(path) => config::load(path),
        None => config::load_optional(Path::new("avatar.toml")),
    };
    let mut job = match loaded {
        Ok(job) => job,
        Err(e) => {
            println!("Error: {e}");
            return Ok(());
        }
    };

    apply_cli_overrides(&mut job, &cli);
    if let Err(e) = job.validate() {
        println!("Error: {e}");
        return Ok(());
    }

    let run_config = process::RunConfig::from_job(&job);
    let backend = RustBackend::new();

    if cli.json {
        match process::run(&backend, &run_config, None) {
            Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
            Err(e) => println!("{}", output::format_run_error(&e)),
        }
        return Ok(());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_event(&event);
        }
    });
    let result = process::run(&backend, &run_config, Some(tx));
    printer.join().unwrap();

    match result {
        Ok(_) => println!("{}", output::format_completion()),
        Err(e) => println!("{}", output::format_run_error(&e)),
    }

    Ok(())
}

/// Flags win over the config file; unset flags leave config values alone.
fn apply_cli_overrides(job: &mut config::JobConfig, cli: &Cli) {
    if let Some(input) = &cli.input {
        job.input = input.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        job.output_dir = output_dir.clone();
    }
    if let Some(small) = cli.small_size {
        job.sizes.small = small;
    }
    if let Some(medium) = cli.medium_size {
        job.sizes.medium = medium;
    }
    if let Some(quality) = cli.webp_quality {
        job.encoding.webp_quality = quality;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_job_setting_has_a_flag() {
        let cli = Cli::try_parse_from([
            "avatarize",
            "--input",
            "me.jpg",
            "--output-dir",
            "assets",
            "--small-size",
            "48",
            "--medium-size",
            "96",
            "--webp-quality",
            "70",
        ])
        .unwrap();

        let mut job = config::JobConfig::default();
        apply_cli_overrides(&mut job, &cli);
        assert_eq!(job.input, PathBuf::from("me.jpg"));
        assert_eq!(job.output_dir, PathBuf::from("assets"));
        assert_eq!(job.sizes.small, 48);
        assert_eq!(job.sizes.medium, 96);
        assert_eq!(job.encoding.webp_quality, 70);
    }

    #[test]
    fn unset_flags_leave_config_values_alone() {
        let cli = Cli::try_parse_from(["avatarize", "--small-size", "32"]).unwrap();

        let mut job = config::JobConfig::default();
        apply_cli_overrides(&mut job, &cli);
        assert_eq!(job.sizes.small, 32);
        assert_eq!(job.sizes.medium, 128);
        assert_eq!(job.input, config::JobConfig::default().input);
    }
}
