use clap::{App, Arg, ArgMatches, SubCommand};
use quill_api::posts::{Blog, ListQuery};
use quill_client::{drafts::BlogDraft, safe_string::SafeString, session::Session};
use quill_common::utils::{strip_html, truncate_chars};
use std::path::{Path, PathBuf};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("posts")
        .about("Manage blog posts")
        .subcommand(
            SubCommand::with_name("list")
                .arg(
                    Arg::with_name("page")
                        .short("p")
                        .long("page")
                        .takes_value(true)
                        .help("Page to display"),
                )
                .arg(
                    Arg::with_name("limit")
                        .short("l")
                        .long("limit")
                        .takes_value(true)
                        .help("Posts per page"),
                )
                .arg(
                    Arg::with_name("search")
                        .short("s")
                        .long("search")
                        .takes_value(true)
                        .help("Full-text search"),
                )
                .arg(
                    Arg::with_name("category")
                        .short("c")
                        .long("category")
                        .takes_value(true)
                        .help("Only posts in this category"),
                )
                .arg(
                    Arg::with_name("published")
                        .long("published")
                        .conflicts_with("drafts")
                        .help("Only published posts"),
                )
                .arg(
                    Arg::with_name("drafts")
                        .long("drafts")
                        .help("Only drafts"),
                )
                .about("List posts"),
        )
        .subcommand(
            SubCommand::with_name("show")
                .arg(Arg::with_name("id").required(true).help("Post id"))
                .arg(
                    Arg::with_name("html")
                        .long("html")
                        .help("Print the sanitized HTML body instead of plain text"),
                )
                .about("Show one post in full"),
        )
        .subcommand(
            SubCommand::with_name("new")
                .args(&draft_args())
                .arg(
                    Arg::with_name("publish")
                        .long("publish")
                        .help("Publish right away instead of saving a draft"),
                )
                .about("Create a new post"),
        )
        .subcommand(
            SubCommand::with_name("edit")
                .arg(Arg::with_name("id").required(true).help("Post id"))
                .args(&draft_args())
                .arg(
                    Arg::with_name("remove-tag")
                        .long("remove-tag")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .help("Remove a tag"),
                )
                .arg(
                    Arg::with_name("publish")
                        .long("publish")
                        .conflicts_with("draft")
                        .help("Mark the post as published"),
                )
                .arg(
                    Arg::with_name("draft")
                        .long("draft")
                        .help("Put the post back in draft"),
                )
                .about("Edit an existing post"),
        )
        .subcommand(
            SubCommand::with_name("delete")
                .arg(Arg::with_name("id").required(true).help("Post id"))
                .arg(
                    Arg::with_name("yes")
                        .short("y")
                        .long("yes")
                        .help("Skip the confirmation"),
                )
                .about("Delete a post"),
        )
        .subcommand(
            SubCommand::with_name("publish")
                .arg(Arg::with_name("id").required(true).help("Post id"))
                .about("Toggle the published flag"),
        )
}

fn draft_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("title")
            .short("t")
            .long("title")
            .takes_value(true)
            .help("Post title"),
        Arg::with_name("slug")
            .long("slug")
            .takes_value(true)
            .help("URL slug (derived from the title when omitted)"),
        Arg::with_name("meta-description")
            .long("meta-description")
            .takes_value(true)
            .help("SEO meta description"),
        Arg::with_name("excerpt")
            .long("excerpt")
            .takes_value(true)
            .help("Short excerpt shown in listings"),
        Arg::with_name("category")
            .long("category")
            .takes_value(true)
            .help("Category"),
        Arg::with_name("date")
            .long("date")
            .takes_value(true)
            .help("Publish date (YYYY-MM-DD)"),
        Arg::with_name("content")
            .long("content")
            .takes_value(true)
            .help("File with the post body (.md is rendered, anything else is HTML)"),
        Arg::with_name("image")
            .short("i")
            .long("image")
            .takes_value(true)
            .help("Image file to upload"),
        Arg::with_name("tag")
            .long("tag")
            .takes_value(true)
            .multiple(true)
            .number_of_values(1)
            .help("Add a tag (repeatable)"),
        Arg::with_name("seo-script")
            .long("seo-script")
            .takes_value(true)
            .multiple(true)
            .number_of_values(1)
            .help("File with a raw JSON-LD snippet (repeatable)"),
        Arg::with_name("author-name")
            .long("author-name")
            .takes_value(true)
            .help("Author display name"),
        Arg::with_name("author-avatar")
            .long("author-avatar")
            .takes_value(true)
            .help("Author avatar URL"),
        Arg::with_name("author-bio")
            .long("author-bio")
            .takes_value(true)
            .help("Author biography"),
        Arg::with_name("cta-title")
            .long("cta-title")
            .takes_value(true)
            .help("Call-to-action title"),
        Arg::with_name("cta-link")
            .long("cta-link")
            .takes_value(true)
            .help("Call-to-action link"),
        Arg::with_name("cta-desc")
            .long("cta-desc")
            .takes_value(true)
            .help("Call-to-action description"),
        Arg::with_name("cta-button")
            .long("cta-button")
            .takes_value(true)
            .help("Call-to-action button text"),
    ]
}

pub fn run<'a>(args: &ArgMatches<'a>) {
    let session = Session::open().unwrap_or_else(|e| super::fail(e));
    match args.subcommand() {
        ("list", Some(x)) => list(x, &session),
        ("show", Some(x)) => show(x, &session),
        ("new", Some(x)) => new(x, &session),
        ("edit", Some(x)) => edit(x, &session),
        ("delete", Some(x)) => delete(x, &session),
        ("publish", Some(x)) => publish(x, &session),
        _ => println!("Unknown subcommand"),
    }
}

fn list<'a>(args: &ArgMatches<'a>, session: &Session) {
    let mut query = ListQuery::new();
    if let Some(search) = args.value_of("search") {
        query = query.search(search);
    }
    if let Some(category) = args.value_of("category") {
        query = query.category(category);
    }
    if args.is_present("published") {
        query = query.published(Some(true));
    } else if args.is_present("drafts") {
        query = query.published(Some(false));
    }
    if let Some(limit) = args.value_of("limit") {
        query = query.limit(limit.parse().expect("--limit must be a number"));
    }
    // Page comes last: picking a filter goes back to page 1.
    if let Some(page) = args.value_of("page") {
        query = query.page(page.parse().expect("--page must be a number"));
    }

    let result = session
        .api
        .list(&query)
        .unwrap_or_else(|e| super::fail(e));

    if result.data.is_empty() {
        println!("No posts found.");
        return;
    }

    for blog in &result.data {
        println!(
            "{:<26} {:<9} {:<42} {:<14} {}",
            blog.id,
            if blog.is_published { "published" } else { "draft" },
            truncate_chars(&blog.title, 40),
            truncate_chars(&blog.category, 12),
            blog.date.split('T').next().unwrap_or(""),
        );
    }
    println!(
        "\nPage {}/{} ({} posts)",
        result.pagination.page, result.pagination.total_pages, result.pagination.total
    );
}

fn show<'a>(args: &ArgMatches<'a>, session: &Session) {
    let id = args.value_of("id").unwrap();
    let blog = session.api.get(id).unwrap_or_else(|e| super::fail(e));

    println!("{}", blog.title);
    println!("slug: {}", blog.slug);
    println!(
        "status: {}",
        if blog.is_published { "published" } else { "draft" }
    );
    if !blog.category.is_empty() {
        println!("category: {}", blog.category);
    }
    println!("author: {}", blog.author.name);
    if !blog.date.is_empty() {
        println!("date: {}", blog.date.split('T').next().unwrap_or(""));
    }
    if !blog.tags.is_empty() {
        println!("tags: {}", blog.tags.join(", "));
    }
    if !blog.meta_description.is_empty() {
        println!("meta: {}", blog.meta_description);
    }
    if !blog.image.is_empty() {
        println!("image: {}", blog.image);
    }
    if !blog.seo_scripts.is_empty() {
        println!("seo scripts: {}", blog.seo_scripts.len());
    }
    if blog.has_cta() {
        println!(
            "cta: {} -> {}",
            blog.cta_title.as_deref().unwrap_or(""),
            blog.cta_link.as_deref().unwrap_or("")
        );
    }

    println!();
    if args.is_present("html") {
        println!("{}", SafeString::new(&blog.content));
    } else {
        println!("{}", strip_html(&blog.content));
    }
}

fn new<'a>(args: &ArgMatches<'a>, session: &Session) {
    let mut draft = BlogDraft::new();
    let title = args
        .value_of("title")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("Title"));
    draft.set_title(&title);
    draft.author.name = args
        .value_of("author-name")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("Author name"));
    apply_draft_args(args, &mut draft);
    draft.is_published = args.is_present("publish");

    let blog = session.api.create(&draft).unwrap_or_else(|e| super::fail(e));
    if blog.is_published {
        println!("Blog published successfully ({})", blog.id);
    } else {
        println!("Blog saved as draft ({})", blog.id);
    }
}

fn edit<'a>(args: &ArgMatches<'a>, session: &Session) {
    let id = args.value_of("id").unwrap();
    let blog = session.api.get(id).unwrap_or_else(|e| super::fail(e));
    let mut draft = BlogDraft::from_blog(&blog);

    if let Some(title) = args.value_of("title") {
        // The stored slug wins unless --slug is also given.
        draft.set_title(title);
    }
    if let Some(name) = args.value_of("author-name") {
        draft.author.name = name.to_owned();
    }
    apply_draft_args(args, &mut draft);
    for tag in args.values_of("remove-tag").into_iter().flatten() {
        draft.remove_tag(tag);
    }
    if args.is_present("publish") {
        draft.is_published = true;
    } else if args.is_present("draft") {
        draft.is_published = false;
    }

    session
        .api
        .update(id, &draft)
        .unwrap_or_else(|e| super::fail(e));
    println!("Blog updated successfully");
}

/// Flags shared by `new` and `edit`; only the ones that were given
/// touch the draft.
fn apply_draft_args<'a>(args: &ArgMatches<'a>, draft: &mut BlogDraft) {
    if let Some(slug) = args.value_of("slug") {
        draft.slug = slug.to_owned();
    }
    if let Some(meta) = args.value_of("meta-description") {
        draft.meta_description = meta.to_owned();
    }
    if let Some(excerpt) = args.value_of("excerpt") {
        draft.excerpt = excerpt.to_owned();
    }
    if let Some(category) = args.value_of("category") {
        draft.category = category.to_owned();
    }
    if let Some(date) = args.value_of("date") {
        draft.date = date.to_owned();
    }
    if let Some(content) = args.value_of("content") {
        draft
            .set_content_from_file(Path::new(content))
            .unwrap_or_else(|e| super::fail(e));
    }
    if let Some(image) = args.value_of("image") {
        draft.attach_image(PathBuf::from(image));
    }
    for tag in args.values_of("tag").into_iter().flatten() {
        draft.add_tag(tag);
    }
    for script in args.values_of("seo-script").into_iter().flatten() {
        draft
            .add_seo_script_from_file(Path::new(script))
            .unwrap_or_else(|e| super::fail(e));
    }
    if let Some(avatar) = args.value_of("author-avatar") {
        draft.author.avatar = avatar.to_owned();
    }
    if let Some(bio) = args.value_of("author-bio") {
        draft.author.bio = Some(bio.to_owned());
    }
    if let Some(title) = args.value_of("cta-title") {
        draft.cta_title = Some(title.to_owned());
    }
    if let Some(link) = args.value_of("cta-link") {
        draft.cta_link = Some(link.to_owned());
    }
    if let Some(desc) = args.value_of("cta-desc") {
        draft.cta_desc = Some(desc.to_owned());
    }
    if let Some(button) = args.value_of("cta-button") {
        draft.cta_button_title = Some(button.to_owned());
    }
}

fn delete<'a>(args: &ArgMatches<'a>, session: &Session) {
    let id = args.value_of("id").unwrap();
    if !args.is_present("yes") {
        let answer = super::ask_for("Are you sure you want to delete this blog? (y/N)");
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return;
        }
    }
    session.api.delete(id).unwrap_or_else(|e| super::fail(e));
    println!("Blog deleted.");
}

fn publish<'a>(args: &ArgMatches<'a>, session: &Session) {
    let id = args.value_of("id").unwrap();
    let blog: Blog = session
        .api
        .toggle_publish(id)
        .unwrap_or_else(|e| super::fail(e));
    if blog.is_published {
        println!("Published \"{}\"", blog.title);
    } else {
        println!("Unpublished \"{}\"", blog.title);
    }
}
