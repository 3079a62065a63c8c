use tracing::{error, info};
use tome_rater::catalog::domain::CatalogService;
use tome_rater::catalog::domain::service::Catalog;
use tome_rater::catalog::factory::create_catalog;
use tome_rater::core::domain::Configuration;
use tome_rater::core::library::LibraryResult;
use tome_rater::gateway::GatewayPublisherVia;
use tome_rater::utils::logging::setup_tracing;

const DEV_MODE: bool = true;

fn main() {
    let (config, via) = if DEV_MODE {
        (Configuration::new("dev"), GatewayPublisherVia::Memory)
    } else {
        (Configuration::new("prod"), GatewayPublisherVia::Log)
    };
    setup_tracing(!DEV_MODE);

    let mut catalog = create_catalog(&config, via);
    if let Err(err) = populate(&mut catalog) {
        error!("failed to populate catalog {}", err);
        std::process::exit(1);
    }
    report(&catalog, config.report_size);
}

fn populate(catalog: &mut Catalog) -> LibraryResult<()> {
    let book1 = catalog.create_book("Society of Mind", "12345678", 15.99)?;
    let novel1 = catalog.create_novel("Alice In Wonderland", "Lewis Carroll", "12345", 7.99)?;
    let novel2 = catalog.create_novel("The Diamond Age", "Neal Stephenson", "10101010", 12.99)?;
    let novel3 = catalog.create_novel("There Will Come Soft Rains", "Ray Bradbury", "10001000", 3.99)?;
    let nonfiction1 = catalog.create_non_fiction("Automate the Boring Stuff", "python", "beginner", "1929452", 5.99)?;
    let nonfiction2 = catalog.create_non_fiction("Computing Machinery and Intelligence", "AI", "advanced", "11111938", 0.99)?;

    catalog.add_user("Alan Turing", "alan@turing.com", None)?;
    catalog.add_user("David Marr", "david@computation.org", None)?;
    catalog.add_user("Marvin Minsky", "marvin@mit.edu", Some(&[book1.clone(), novel1.clone(), nonfiction1.clone()][..]))?;

    catalog.add_book_to_user(&book1, "alan@turing.com", Some(1))?;
    catalog.add_book_to_user(&novel1, "alan@turing.com", Some(3))?;
    catalog.add_book_to_user(&nonfiction1, "alan@turing.com", Some(3))?;
    catalog.add_book_to_user(&nonfiction2, "alan@turing.com", Some(4))?;
    catalog.add_book_to_user(&novel3, "alan@turing.com", Some(1))?;

    catalog.add_book_to_user(&novel2, "marvin@mit.edu", Some(2))?;
    catalog.add_book_to_user(&novel3, "marvin@mit.edu", Some(2))?;
    catalog.add_book_to_user(&novel3, "david@computation.org", Some(4))?;
    Ok(())
}

fn report(catalog: &Catalog, n: usize) {
    println!("Catalog:");
    catalog.print_catalog();
    println!("\nUsers:");
    catalog.print_users();

    println!("\nMost positive user:");
    if let Some(user) = catalog.most_positive_user() {
        println!("{}", user);
    }
    println!("Highest rated book:");
    if let Some(book) = catalog.highest_rated_book() {
        println!("{}", book);
    }
    println!("Most read book:");
    if let Some(book) = catalog.get_most_read_book() {
        println!("{}", book);
    }

    println!("\n{} most read books:", n);
    for (book, count) in catalog.get_n_most_read_books(n) {
        println!("{} ({} reads)", book, count);
    }
    println!("{} most prolific readers:", n);
    for user in catalog.get_n_most_prolific_readers(n) {
        println!("{}", user);
    }
    println!("{} most expensive books:", n);
    for (price, book) in catalog.get_n_most_expensive_books(n) {
        println!("{:.2} {}", price, book);
    }

    println!();
    for user in catalog.users() {
        match catalog.get_worth_of_user(user.email()) {
            Ok(worth) => println!("{}", worth),
            Err(err) => error!("{}", err),
        }
    }
    info!(events = catalog.events().len(), "catalog report complete");
}
