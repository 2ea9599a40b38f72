//! Numbered menus for picking a site and an operation from stdin.

use std::io::{self, BufRead, Write};

use siteops_core::{AppViewModel, Msg};

const ALL_SITES: &str = "all";

/// Asks for one site (or all of them) and one operation, re-asking until each
/// answer is a valid menu number. Returns the equivalent form messages.
pub fn prompt_selection<R, W>(view: &AppViewModel, mut input: R, mut output: W) -> io::Result<Vec<Msg>>
where
    R: BufRead,
    W: Write,
{
    if view.operations.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no operations are configured",
        ));
    }

    let site_choices: Vec<&str> = std::iter::once(ALL_SITES)
        .chain(view.sites.iter().map(|site| site.name.as_str()))
        .collect();
    let site_index = loop {
        writeln!(output, "Sites:")?;
        for (index, name) in site_choices.iter().enumerate() {
            writeln!(output, "    {index} {name}")?;
        }
        if let Some(index) = ask(&mut input, &mut output, "Site [0]? ", Some(0), site_choices.len())? {
            break index;
        }
    };

    let op_index = loop {
        writeln!(output, "\nOperations:")?;
        for (index, op) in view.operations.iter().enumerate() {
            writeln!(output, "    {index} {}", op.name)?;
        }
        if let Some(index) = ask(&mut input, &mut output, "Operation? ", None, view.operations.len())? {
            break index;
        }
    };

    let site_msg = match site_index {
        0 => Msg::AllSitesToggled(true),
        index => Msg::SiteToggled {
            site: site_choices[index].to_string(),
            checked: true,
        },
    };
    Ok(vec![
        site_msg,
        Msg::OperationSelected(Some(view.operations[op_index].name.clone())),
    ])
}

/// `Ok(None)` means the answer was rejected and the menu should be shown again.
fn ask<R, W>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: Option<usize>,
    choices: usize,
) -> io::Result<Option<usize>>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before a choice was made",
        ));
    }

    let answer = line.trim();
    if answer.is_empty() {
        if let Some(default) = default {
            return Ok(Some(default));
        }
    }
    match answer.parse::<i64>() {
        Err(_) => {
            writeln!(output, "Invalid number")?;
            Ok(None)
        }
        Ok(index) if index < 0 || index as usize >= choices => {
            writeln!(output, "Invalid choice")?;
            Ok(None)
        }
        Ok(index) => Ok(Some(index as usize)),
    }
}
