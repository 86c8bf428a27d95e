// Input sanitization for values that end up as arguments to an external
// process. Command::arg already prevents shell interpretation; these checks
// reject values that would be dangerous in any other context too.

use anyhow::{ensure, Context, Result};
use url::Url;

/// Upper bound on accepted URL length
const MAX_URL_LENGTH: usize = 2048;

/// Upper bound on accepted output file names
const MAX_OUTPUT_LENGTH: usize = 255;

/// Validate a target URL before it is handed to the extraction collaborator.
///
/// Requires a parseable http(s) URL with a hostname, bounded length, and no
/// shell metacharacters or null bytes.
pub fn validate_target_url(url_str: &str) -> Result<()> {
    let trimmed = url_str.trim();

    ensure!(!trimmed.is_empty(), "URL cannot be empty");
    ensure!(
        url_str.len() <= MAX_URL_LENGTH,
        "URL is too long ({} characters, max {})",
        url_str.len(),
        MAX_URL_LENGTH
    );
    ensure!(!url_str.contains('\0'), "URL contains null byte");

    const DANGEROUS_CHARS: [char; 5] = [';', '|', '`', '\n', '\r'];
    for ch in DANGEROUS_CHARS {
        ensure!(
            !url_str.contains(ch),
            "URL contains dangerous character '{}'",
            ch.escape_default()
        );
    }
    ensure!(
        !url_str.contains("$("),
        "URL contains command substitution pattern"
    );

    let url = Url::parse(url_str).context("Invalid URL format")?;

    let scheme = url.scheme();
    ensure!(
        scheme == "http" || scheme == "https",
        "URL must use http or https, got: {}",
        scheme
    );
    ensure!(url.host_str().is_some(), "URL has no hostname");

    Ok(())
}

/// Validate a user-supplied output file name.
///
/// The name is joined under the output directory, so path traversal,
/// absolute paths and drive letters are rejected along with shell
/// metacharacters.
pub fn validate_output_name(output: &str) -> Result<()> {
    let trimmed = output.trim();

    ensure!(!trimmed.is_empty(), "Output name cannot be empty");
    ensure!(
        !output.contains(".."),
        "Output name contains path traversal (..)"
    );
    ensure!(
        !output.starts_with('/') && !output.starts_with('\\'),
        "Output name must be relative: {}",
        output
    );
    if output.len() >= 2 {
        ensure!(
            output.chars().nth(1) != Some(':'),
            "Output name must not contain a drive letter: {}",
            output
        );
    }
    ensure!(!output.contains('\0'), "Output name contains null byte");

    const DANGEROUS_CHARS: [char; 7] = ['|', '&', ';', '$', '`', '\n', '\r'];
    for ch in DANGEROUS_CHARS {
        ensure!(
            !output.contains(ch),
            "Output name contains dangerous character '{}'",
            ch.escape_default()
        );
    }

    ensure!(
        output.len() <= MAX_OUTPUT_LENGTH,
        "Output name is too long ({} characters, max {})",
        output.len(),
        MAX_OUTPUT_LENGTH
    );

    Ok(())
}
