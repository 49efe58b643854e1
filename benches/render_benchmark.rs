use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tui_article_app::internal::highlight::highlight;
use tui_article_app::internal::models::Article;
use tui_article_app::internal::search::filter;
use tui_article_app::internal::ui::view::wrap_summary;

fn benchmark_highlight(c: &mut Criterion) {
    let paragraph = "CSS Grid is the first layout system in the browser that is genuinely \
        two-dimensional: rows and columns are declared together, and items are placed onto \
        the resulting tracks. "
        .repeat(20);

    c.bench_function("highlight short term", |b| {
        b.iter(|| highlight(black_box(&paragraph), black_box("grid")))
    });

    c.bench_function("highlight term with no match", |b| {
        b.iter(|| highlight(black_box(&paragraph), black_box("python")))
    });
}

fn benchmark_filter(c: &mut Criterion) {
    let articles: Vec<Article> = (0..1000)
        .map(|i| Article {
            id: i,
            title: format!("Article {} about layout", i),
            author: "Bench Author".to_string(),
            date: "Jan 1, 2024".to_string(),
            excerpt: Some("An excerpt mentioning flexbox and grid.".to_string()),
            content: "Paragraph one about the browser.\n\nParagraph two about rendering."
                .to_string(),
            tags: vec!["css".to_string(), "javascript".to_string()],
        })
        .collect();

    c.bench_function("filter 1000 articles", |b| {
        b.iter(|| filter(black_box(&articles), black_box("flexbox")))
    });
}

fn benchmark_wrap_summary(c: &mut Criterion) {
    let summary = "A summary that needs to be wrapped across multiple lines to test the \
        performance of the card wrapping logic in the list view. It should handle various \
        lengths and widths gracefully."
        .repeat(4);

    c.bench_function("wrap_summary", |b| {
        b.iter(|| wrap_summary(black_box(&summary), black_box(96), black_box(2)))
    });
}

criterion_group!(
    benches,
    benchmark_highlight,
    benchmark_filter,
    benchmark_wrap_summary
);
criterion_main!(benches);
