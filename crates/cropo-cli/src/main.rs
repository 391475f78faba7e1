use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cropo_core::decode::decode_photo;
use cropo_core::{rasterize_async, DisplayedImage, FsStore, PassportPhotoUploader};

mod config;
mod logging;

use config::SelectionArgs;

#[derive(Parser, Debug)]
#[command(name = "cropo", version, about = "Crop photos to 35x45 passport JPEGs")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crop a photo and write the JPEG to a file.
    Crop(CropArgs),
    /// Crop a photo and store it as an owner's passport photo.
    Upload(UploadArgs),
}

#[derive(Parser, Debug)]
struct CropArgs {
    /// Input photo.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    selection: SelectionArgs,
}

#[derive(Parser, Debug)]
struct UploadArgs {
    /// Input photo.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Id of the person the photo belongs to.
    #[arg(long)]
    owner: String,

    /// Root directory of the artifact store.
    #[arg(long)]
    store: PathBuf,

    #[command(flatten)]
    selection: SelectionArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.cmd {
        Command::Crop(args) => cmd_crop(args).await,
        Command::Upload(args) => cmd_upload(args).await,
    }
}

async fn load_photo(path: &Path, selection: &SelectionArgs) -> anyhow::Result<DisplayedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("read photo '{}'", path.display()))?;
    let image = decode_photo(&bytes).with_context(|| format!("decode photo '{}'", path.display()))?;
    selection.layout(image)
}

async fn cmd_crop(args: CropArgs) -> anyhow::Result<()> {
    let image = load_photo(&args.in_path, &args.selection).await?;
    let crop = args.selection.crop_region(&image)?;

    let cropped = rasterize_async(Some(Arc::new(image)), crop).await?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    tokio::fs::write(&args.out, &cropped.bytes)
        .await
        .with_context(|| format!("write jpeg '{}'", args.out.display()))?;

    tracing::info!(
        width = cropped.width,
        height = cropped.height,
        "wrote {}",
        args.out.display()
    );
    Ok(())
}

async fn cmd_upload(args: UploadArgs) -> anyhow::Result<()> {
    let image = load_photo(&args.in_path, &args.selection).await?;
    let crop = args.selection.crop_region(&image)?;

    let uploader = PassportPhotoUploader::new(FsStore::new(&args.store));
    let receipt = uploader
        .crop_and_upload(&args.owner, Some(Arc::new(image)), crop)
        .await?;

    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}
