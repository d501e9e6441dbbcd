//! Output formatting module.
//!
//! Plain, JSON, and CSV renderings of scan reports, plus the progress bar
//! and the small styled message helpers. Rendering lives entirely here; the
//! engine and orchestrators only ever produce data.

use crate::cli::OutputFormat;
use crate::recon::{PortScanReport, SubdomainScanReport, UsernameScanReport};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

const RULE: &str = "───────────────────────────────────────────────────────────────";

/// Build the scan progress bar used by all three modules.
pub fn progress_bar(total: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message(label.to_string());
    pb
}

/// Print a header before a scan begins.
pub fn print_scan_header(module: &str, target: &str, detail: &str) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("wraith").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{} Module: {}", style("•").dim(), style(module).yellow());
    println!(
        "{} Target: {}",
        style("•").dim(),
        style(target).white().bold()
    );
    println!("{} {}", style("•").dim(), detail);
    println!();
}

/// Format and print a port scan report.
pub fn print_port_report(report: &PortScanReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => print_ports_plain(report),
        OutputFormat::Json => print_json(report),
        OutputFormat::Csv => print_ports_csv(report),
    }
}

fn print_ports_plain(report: &PortScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(out, "  {} {}", style("Target:").bold(), report.target)?;
    writeln!(
        out,
        "  {} {} ports scanned in {:.2}s, {} open",
        style("Result:").bold(),
        report.report.total_jobs,
        report.duration_ms as f64 / 1000.0,
        style(report.report.found_count()).green().bold()
    )?;
    writeln!(out)?;

    if report.report.entries.is_empty() {
        writeln!(out, "  {}", style("No open ports found.").dim())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(
        out,
        "  {:>6}  {:<18}  {}",
        style("PORT").bold(),
        style("SERVICE").bold(),
        style("BANNER").bold()
    )?;
    writeln!(out, "  {}", style(RULE).dim())?;

    for entry in &report.report.entries {
        let service = entry.payload.get("service").map(String::as_str).unwrap_or("Unknown");
        let banner = entry.payload.get("banner").map(String::as_str).unwrap_or("");
        writeln!(
            out,
            "  {:>6}  {:<18}  {}",
            style(entry.key).yellow().bold(),
            service,
            style(if banner.is_empty() { "-" } else { banner }).dim()
        )?;
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(out)?;
    Ok(())
}

fn print_ports_csv(report: &PortScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    wtr.write_record(["port", "service", "banner"])?;
    for entry in &report.report.entries {
        wtr.write_record([
            &entry.key.to_string(),
            entry.payload.get("service").map(String::as_str).unwrap_or("Unknown"),
            entry.payload.get("banner").map(String::as_str).unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Format and print a subdomain discovery report.
pub fn print_subdomain_report(report: &SubdomainScanReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => print_subdomains_plain(report),
        OutputFormat::Json => print_json(report),
        OutputFormat::Csv => print_subdomains_csv(report),
    }
}

fn print_subdomains_plain(report: &SubdomainScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(out, "  {} {}", style("Domain:").bold(), report.domain)?;
    writeln!(
        out,
        "  {} {} unique subdomains in {:.2}s ({} from certificate logs)",
        style("Result:").bold(),
        style(report.report.found_count()).green().bold(),
        report.duration_ms as f64 / 1000.0,
        report.passive_count
    )?;
    writeln!(out)?;

    if report.report.entries.is_empty() {
        writeln!(out, "  {}", style("No subdomains found.").dim())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(
        out,
        "  {:<45}  {:<10}  {}",
        style("SUBDOMAIN").bold(),
        style("SOURCE").bold(),
        style("IP").bold()
    )?;
    writeln!(out, "  {}", style(RULE).dim())?;

    for entry in &report.report.entries {
        let ip = entry.payload.get("ip").map(String::as_str).unwrap_or("-");
        writeln!(
            out,
            "  {:<45}  {:<10}  {}",
            style(&entry.key).cyan(),
            entry.source,
            style(ip).dim()
        )?;
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(out)?;
    Ok(())
}

fn print_subdomains_csv(report: &SubdomainScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    wtr.write_record(["subdomain", "source", "ip"])?;
    for entry in &report.report.entries {
        wtr.write_record([
            entry.key.as_str(),
            entry.source.as_str(),
            entry.payload.get("ip").map(String::as_str).unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Format and print a username search report.
pub fn print_username_report(report: &UsernameScanReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => print_usernames_plain(report),
        OutputFormat::Json => print_json(report),
        OutputFormat::Csv => print_usernames_csv(report),
    }
}

fn print_usernames_plain(report: &UsernameScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(out, "  {} {}", style("Username:").bold(), report.username)?;
    writeln!(
        out,
        "  {} {} of {} platforms in {:.2}s",
        style("Result:").bold(),
        style(report.report.found_count()).green().bold(),
        report.report.total_jobs,
        report.duration_ms as f64 / 1000.0
    )?;
    writeln!(out)?;

    if report.report.entries.is_empty() {
        writeln!(out, "  {}", style("No profiles found on any platform.").dim())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(
        out,
        "  {:<14}  {}",
        style("PLATFORM").bold(),
        style("URL").bold()
    )?;
    writeln!(out, "  {}", style(RULE).dim())?;

    for entry in &report.report.entries {
        let url = entry.payload.get("url").map(String::as_str).unwrap_or("-");
        writeln!(out, "  {:<14}  {}", entry.key, style(url).cyan())?;
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(out)?;
    Ok(())
}

fn print_usernames_csv(report: &UsernameScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    wtr.write_record(["platform", "url", "status"])?;
    for entry in &report.report.entries {
        wtr.write_record([
            entry.key.as_str(),
            entry.payload.get("url").map(String::as_str).unwrap_or(""),
            entry.payload.get("status").map(String::as_str).unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn print_json<T: serde::Serialize>(report: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

/// Print an informational message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("•").cyan(), msg);
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}
