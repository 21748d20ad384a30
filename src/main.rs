use clap::{Parser, Subcommand};
use pixrelay::loader::AssetLoader;
use pixrelay::transform::{ByteSniffer, Crop, Dispatcher, Quality, SystemRunner, Transform};
use std::path::{Path, PathBuf};

/// Transform flags shared by every command that dispatches.
#[derive(clap::Args, Clone)]
struct TransformFlags {
    /// Target output format (jpg, jpeg, png, gif, pdf, webp)
    #[arg(long)]
    format: String,

    /// Target width in pixels; omit or 0 to let the encoder pick
    #[arg(long, default_value_t = 0)]
    width: u32,

    /// Target height in pixels; omit or 0 to let the encoder pick
    #[arg(long, default_value_t = 0)]
    height: u32,

    /// Crop rectangle in WxH+X+Y geometry, e.g. 400x300+10+20
    #[arg(long)]
    crop: Option<Crop>,

    /// Encoding quality 1-100
    #[arg(long, default_value_t = 92)]
    quality: u32,

    /// Source format token; defaults to the source's file extension
    #[arg(long)]
    source_ext: Option<String>,
}

impl TransformFlags {
    /// Build the request descriptor; `source` supplies the fallback
    /// extension token.
    fn to_transform(&self, source: &Path) -> Transform {
        Transform {
            output: self.format.clone(),
            width: self.width,
            height: self.height,
            crop: self.crop.unwrap_or_default(),
            extension: self.source_ext.clone().unwrap_or_else(|| {
                source
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or_default()
                    .to_ascii_lowercase()
            }),
        }
    }
}

#[derive(Parser)]
#[command(name = "pixrelay")]
#[command(about = "Fetch an image and dispatch it to the right external encoder")]
#[command(long_about = "\
Fetch an image and dispatch it to the right external encoder

Sources are HTTP(S) URLs or local paths — whichever parses. Output formats
map to tool families:

  jpg, jpeg, png, gif, pdf   ImageMagick convert
  webp                       cwebp (static) / gif2webp (animated)

An animated gif that needs cropping or resizing takes two passes: convert
applies the geometry into an intermediate gif, gif2webp re-encodes it.

The input's real content type is sniffed from bytes; only jpeg, png, webp
and gif sources are accepted, whatever the filename says.")]
#[command(version)]
struct Cli {
    /// Log each tool invocation and its captured output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a source (URL or local path) into a destination file
    Fetch { source: String, dest: PathBuf },
    /// Transform a local image into the requested format
    Transform {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        flags: TransformFlags,
    },
    /// Fetch then transform in one go
    Run {
        source: String,
        output: PathBuf,
        #[command(flatten)]
        flags: TransformFlags,
    },
    /// Print the tool invocations a transform would run, as JSON
    Plan {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        flags: TransformFlags,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Command::Fetch { source, dest } => {
            let written = AssetLoader::new().load(&source, &dest)?;
            println!("{} -> {} ({} bytes)", source, dest.display(), written);
        }
        Command::Transform {
            input,
            output,
            flags,
        } => {
            let t = flags.to_transform(&input);
            dispatcher(&flags, cli.verbose).process(&t, &input, &output)?;
            println!("{} -> {}", input.display(), output.display());
        }
        Command::Run {
            source,
            output,
            flags,
        } => {
            let working = working_file_for(&output);
            let written = AssetLoader::new().load(&source, &working)?;
            log::info!("fetched {} bytes to {}", written, working.display());

            let t = flags.to_transform(Path::new(&source));
            let result = dispatcher(&flags, cli.verbose).process(&t, &working, &output);
            let _ = std::fs::remove_file(&working);
            result?;
            println!("{} -> {}", source, output.display());
        }
        Command::Plan {
            input,
            output,
            flags,
        } => {
            let t = flags.to_transform(&input);
            let plan = dispatcher(&flags, cli.verbose).plan(&t, &input, &output)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
    }

    Ok(())
}

fn dispatcher(flags: &TransformFlags, verbose: bool) -> Dispatcher<ByteSniffer, SystemRunner> {
    Dispatcher::new(ByteSniffer::new(), SystemRunner::new())
        .with_quality(Quality::new(flags.quality))
        .with_verbose(verbose)
}

/// Working file the `run` command owns: a sibling of the output, removed
/// once the transform finishes either way.
fn working_file_for(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".orig");
    output.with_file_name(name)
}
