// CLI layer: parses the command line, drives the two upload steps in
// order, and prints the result. All decisions about what to print and
// which exit code to use live here; the `api` module only returns
// values.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::api::{ApiClient, UploadOutcome, UploadRequest};

/// Upload a single file to gofile.io and print the download links.
#[derive(Parser, Debug)]
#[command(name = "gofile-cli", version)]
pub struct Args {
    /// File to upload
    #[arg(short, long)]
    pub file: PathBuf,

    /// Override mimetype detection (example: -m text/plain)
    #[arg(short, long)]
    pub mime: Option<String>,

    /// GoFile account token to associate the upload with
    #[arg(short, long)]
    pub token: Option<String>,

    /// Protect the uploaded file with a password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Print progress details while uploading
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the whole operation: resolve a server, read the file, upload.
/// Each step is fatal on failure; the next one is never attempted.
pub fn run(args: &Args) -> Result<UploadOutcome> {
    let api = ApiClient::from_env().context("Failed to build HTTP client")?;

    if args.verbose {
        println!("Obtaining best server...");
    }
    let server = api
        .resolve_best_server()
        .context("Could not resolve an upload server")?;
    if args.verbose {
        println!("Server selected: {server}");
    }

    let request = UploadRequest::from_path(
        &args.file,
        args.mime.clone(),
        args.token.clone(),
        args.password.clone(),
    )?;
    if args.verbose {
        println!("Read file");
        println!(
            "File: {}, mime type: {}, token: {}, password: {}",
            args.file.display(),
            request.mime_type,
            or_empty(request.token.as_deref()),
            or_empty(request.password.as_deref()),
        );
    }

    api.upload(&request, &server)
        .context("Failed to send upload request")
}

/// Print the outcome and return the process exit code: 0 only for a
/// successful upload.
pub fn report(outcome: &UploadOutcome) -> i32 {
    match outcome {
        UploadOutcome::Success(info) => {
            println!("File submitted:");
            println!("Download URL: {}", info.download_page);
            println!("Filename: {}", info.file_name);
            println!("MD5 hash: {}", info.md5);
            println!("Direct link: {}", info.direct_link);
            0
        }
        UploadOutcome::Failure { detail } => {
            eprintln!("Upload rejected, dumped response:\n{detail}");
            1
        }
    }
}

fn or_empty(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => "Empty",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UploadInfo;

    #[test]
    fn parses_all_flags() {
        let args = Args::parse_from([
            "gofile-cli",
            "--file",
            "notes.txt",
            "--mime",
            "text/plain",
            "--token",
            "tok",
            "--password",
            "pw",
            "--verbose",
        ]);
        assert_eq!(args.file, PathBuf::from("notes.txt"));
        assert_eq!(args.mime.as_deref(), Some("text/plain"));
        assert_eq!(args.token.as_deref(), Some("tok"));
        assert_eq!(args.password.as_deref(), Some("pw"));
        assert!(args.verbose);
    }

    #[test]
    fn short_flags_match_the_original_tool() {
        let args = Args::parse_from(["gofile-cli", "-f", "a.bin", "-m", "text/plain", "-v"]);
        assert_eq!(args.file, PathBuf::from("a.bin"));
        assert_eq!(args.mime.as_deref(), Some("text/plain"));
        assert!(args.verbose);
        assert!(args.token.is_none());
    }

    #[test]
    fn file_argument_is_required() {
        assert!(Args::try_parse_from(["gofile-cli", "-v"]).is_err());
    }

    #[test]
    fn exit_code_follows_outcome() {
        assert_eq!(report(&UploadOutcome::Success(UploadInfo::default())), 0);
        assert_eq!(
            report(&UploadOutcome::Failure {
                detail: "{}".into()
            }),
            1
        );
    }
}
