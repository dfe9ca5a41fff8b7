use clap::{ArgAction, Parser};
use imgmeta::{
    Directory, ImageFormat, TagValue, logging,
    util::{hex_dump, hex_string},
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Print header metadata of BMP, GIF, PSD, PCX and JPEG files")]
struct Args {
    /// Image file path
    path: PathBuf,

    /// Force a format instead of sniffing the first bytes
    #[arg(long, value_enum)]
    format: Option<ImageFormat>,

    /// Output as JSON instead of human-readable text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Hex-dump every JPEG segment up to the first scan
    #[arg(long, action = ArgAction::SetTrue)]
    segments: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct TagView {
    code: i32,
    name: String,
    value: serde_json::Value,
    description: String,
}

#[derive(Debug, Serialize)]
struct DirectoryView {
    name: &'static str,
    tags: Vec<TagView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    if args.segments {
        return dump_segments(&args);
    }

    let directories = match args.format {
        Some(format) => imgmeta::read_metadata(&args.path, format)?,
        None => imgmeta::read_any(&args.path)?,
    };

    if args.json {
        let views: Vec<DirectoryView> = directories.iter().map(view).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        print_human(&directories);
    }
    Ok(())
}

fn view(d: &Directory) -> DirectoryView {
    let tags = d
        .tags()
        .map(|(code, value)| TagView {
            code,
            name: d.tag_name(code),
            value: json_value(value),
            description: d.description(code).unwrap_or_default(),
        })
        .collect();
    DirectoryView {
        name: d.name(),
        tags,
        errors: d.errors().to_vec(),
    }
}

fn json_value(value: &TagValue) -> serde_json::Value {
    match value {
        TagValue::Bytes(b) => serde_json::Value::String(hex_string(b)),
        other => serde_json::to_value(other).unwrap_or(serde_json::Value::Null),
    }
}

fn print_human(directories: &[Directory]) {
    for d in directories {
        for (code, _) in d.tags() {
            let description = d.description(code).unwrap_or_default();
            println!("[{}] {} - {}", d.name(), d.tag_name(code), description);
        }
        for e in d.errors() {
            println!("[{}] ERROR: {}", d.name(), e);
        }
    }
}

fn dump_segments(args: &Args) -> anyhow::Result<()> {
    let data = imgmeta::read_segments(&args.path, None)?;
    for kind in data.segment_types() {
        for (i, payload) in data.segments(kind).enumerate() {
            println!("{} #{} ({} bytes)", kind, i, payload.len());
            print!("{}", hex_dump(payload, 0));
        }
    }
    Ok(())
}
