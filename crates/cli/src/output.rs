use anyhow::Result;
use chisel_directive::{Directive, Extractor};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

#[derive(Serialize)]
struct DirectiveOutput<'a> {
    #[serde(flatten)]
    directive: &'a Directive,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<String>,
}

pub fn render_json(extractor: &Extractor, directives: &[Directive], prompt: bool) -> Result<String> {
    let items: Vec<_> = directives
        .iter()
        .map(|directive| DirectiveOutput {
            directive,
            prompt: prompt.then(|| extractor.prompt(directive)),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&items)?)
}

/// One header line per directive followed by its indented text
pub fn render_text(
    extractor: &Extractor,
    file: &Path,
    directives: &[Directive],
    prompt: bool,
) -> String {
    directives
        .iter()
        .map(|d| {
            let body = if prompt {
                extractor.prompt(d)
            } else {
                d.tag_text.trim_end().to_string()
            };
            let indented: Vec<_> = body.lines().map(|line| format!("    {line}")).collect();
            format!(
                "{}:{}-{} {} ({})\n{}",
                file.display(),
                d.function_start_line,
                d.function_end_line,
                d.function_name,
                d.binding.as_str(),
                indented.join("\n")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}
