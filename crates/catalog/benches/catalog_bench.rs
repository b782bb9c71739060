use catalog::{BookFilter, CatalogStore, InMemoryCatalog};
use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{NewBook, RatingEvent, Score};

/// Populate a catalog with N books across four genres.
async fn populate_catalog(catalog: &InMemoryCatalog, n: usize) {
    let genres = ["mystery", "romance", "horror", "poetry"];
    for i in 0..n {
        catalog
            .insert_book(NewBook::new(
                format!("title {i}"),
                format!("author {}", i % 25),
                genres[i % genres.len()],
                "A teaser. More detail follows.",
                "pw",
            ))
            .await
            .unwrap();
    }
}

fn bench_append_rating(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let catalog = InMemoryCatalog::new();
    rt.block_on(populate_catalog(&catalog, 100));
    let id = rt.block_on(catalog.list_books()).unwrap()[50].id;
    let rating = RatingEvent::new(
        Score::new(4).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    );

    c.bench_function("catalog/append_rating", |b| {
        b.iter(|| {
            rt.block_on(catalog.append_rating(id, rating)).unwrap();
        });
    });
}

fn bench_list_1000_books(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let catalog = InMemoryCatalog::new();
    rt.block_on(populate_catalog(&catalog, 1000));

    c.bench_function("catalog/list_1000_books", |b| {
        b.iter(|| rt.block_on(catalog.list_books()).unwrap());
    });
}

fn bench_find_by_genre(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let catalog = InMemoryCatalog::new();
    rt.block_on(populate_catalog(&catalog, 1000));

    c.bench_function("catalog/find_by_genre_of_1000", |b| {
        b.iter(|| {
            rt.block_on(catalog.find_books(BookFilter::for_genre("poetry")))
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_append_rating,
    bench_list_1000_books,
    bench_find_by_genre
);
criterion_main!(benches);
