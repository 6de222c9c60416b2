use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::error;
use paperlog::config::Project;
use paperlog::filter::{Mode, Visibility};
use paperlog::page::paginate;
use paperlog::parser::Parser;
use paperlog::sort::sorted_visible_posts;
use paperlog::tag::unique_sorted_tags;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("info")).init();

    let common_args = [
        Arg::with_name("project")
            .help("The project directory (or any directory beneath it)")
            .default_value("."),
        Arg::with_name("dev")
            .long("dev")
            .help("Show scheduled posts, as in a development preview"),
        Arg::with_name("now")
            .long("now")
            .takes_value(true)
            .help("Evaluate visibility at this RFC 3339 instant instead of the current time"),
    ];

    let matches = App::new("paperlog")
        .about("Lists the visible posts and tags of a blog project")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("posts")
                .about("List visible posts, newest first")
                .args(&common_args)
                .arg(
                    Arg::with_name("page")
                        .long("page")
                        .takes_value(true)
                        .help("Only print this page of the listing (1-based)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("tags")
                .about("List the distinct tags of visible posts")
                .args(&common_args),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("posts", Some(matches)) => list_posts(matches),
        ("tags", Some(matches)) => list_tags(matches),
        _ => unreachable!(),
    };
    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn load(matches: &ArgMatches) -> Result<(Project, Vec<paperlog::post::Post>, Visibility)> {
    let project = Project::from_directory_or_default(Path::new(
        matches.value_of("project").unwrap_or("."),
    ))?;
    let posts = Parser::new(&project.posts_directory).parse_posts()?;
    let now = match matches.value_of("now") {
        Some(now) => parse_now(now)?,
        None => Utc::now(),
    };
    let mode = if matches.is_present("dev") {
        Mode::Development
    } else {
        Mode::Production
    };
    let visibility = Visibility::new(now, mode, project.site.scheduled_margin());
    Ok((project, posts, visibility))
}

fn list_posts(matches: &ArgMatches) -> Result<()> {
    let (project, posts, visibility) = load(matches)?;
    let sorted = sorted_visible_posts(&posts, &visibility);
    let pages = paginate(&sorted, project.site.post_per_page);
    let selected = match matches.value_of("page") {
        None => pages.iter().collect::<Vec<_>>(),
        Some(page) => {
            let number = parse_page(page)?;
            pages.iter().filter(|p| p.number == number).collect()
        }
    };
    for page in selected {
        for post in &page.items {
            let date = match post.effective_date() {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => "----------".to_owned(),
            };
            println!("{}  {}  {}", date, project.site.post_url(&post.id)?, post.title);
        }
    }
    Ok(())
}

fn list_tags(matches: &ArgMatches) -> Result<()> {
    let (project, posts, visibility) = load(matches)?;
    for tag in unique_sorted_tags(&posts, &visibility) {
        println!("{}  {}  {}", tag.slug, project.site.tag_url(&tag.slug)?, tag.name);
    }
    Ok(())
}

fn parse_now(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid --now value `{}`", value))?
        .with_timezone(&Utc))
}

fn parse_page(value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(anyhow!("Invalid --page value `{}`", value)),
    }
}
