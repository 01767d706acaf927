use crate::config::{Attrs, Config, TargetId};
use crate::context::list_contexts;
use crate::target::TargetReport;
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "")]
    current: &'static str,
    target: String,
}

pub fn target_report(report: &TargetReport) {
    match (&report.target, &report.context) {
        (None, _) => println!("no target set"),
        (Some(target), None) => println!("target set to {}", target.bold()),
        (Some(target), Some(context)) => println!(
            "target set to {}, with context {}",
            target.bold(),
            context.bold()
        ),
    }
}

pub fn targets(config: &Config) {
    if config.is_empty() {
        println!("no targets");
        return;
    }

    let rows = config
        .targets()
        .enumerate()
        .map(|(index, (id, entry))| TargetRow {
            index,
            current: marker(entry.current),
            target: id.to_string(),
        });

    println!("{}", Table::new(rows).with(Style::blank()));
}

pub fn no_context(target: Option<&TargetId>) {
    match target {
        Some(target) => println!("no context set in target {target}"),
        None => println!("no target set"),
    }
}

/// Prints targets with their attributes and the contexts beneath them,
/// narrowed to one target and one context when filters are given.
pub fn contexts(config: &Config, target: Option<&TargetId>, context: Option<&str>) {
    for (target_index, (id, entry)) in config.targets().enumerate() {
        if target.is_some_and(|wanted| wanted != id) {
            continue;
        }

        println!();
        let header = format!("[{target_index}]{}[{id}]", marker(entry.current));
        if entry.current {
            println!("{}", header.green().bold());
        } else {
            println!("{}", header.bold());
        }
        print_attrs(&entry.attrs, 2);

        for listing in list_contexts(config, Some(id), context) {
            println!();
            println!(
                "  [{}]{}[{}]",
                listing.index,
                marker(listing.current_context),
                listing.name.cyan()
            );
            print_attrs(listing.attrs, 4);
        }
    }
    println!();
}

fn print_attrs(attrs: &Attrs, indent: usize) {
    if attrs.is_empty() {
        return;
    }

    let Ok(yaml) = serde_yaml::to_string(attrs) else {
        return;
    };
    for line in yaml.lines() {
        println!("{:indent$}{line}", "");
    }
}

fn marker(current: bool) -> &'static str {
    if current { "*" } else { " " }
}
