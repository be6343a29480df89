use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use match_view::core::{
    aggregate::average_match_level,
    filters::{apply_filters, FilterCriteria, FilterField},
    normalize::normalize,
    sorting::{sort_users, SortConfig, SortDirection, SortKey},
};
use match_view::models::{Match, RawUser, User};

fn create_user(id: usize) -> User {
    normalize(RawUser {
        user_id: id.to_string(),
        first_name: format!("User{}", id % 97),
        last_name: Some(format!("Family{}", id % 13)),
        email: Some(format!("user{}@example.test", id)),
        interested_in: Some(vec!["Engineering".to_string(), format!("Topic{}", id % 7)]),
        matches: Some(
            (0..(id % 6))
                .map(|m| Match {
                    opp_id: format!("{}-{}", id, m),
                    role: format!("Role{}", (id + m) % 11),
                    org_name: format!("Org{}", m),
                    contact_email: "hr@org.test".to_string(),
                    match_level: ((id * 7 + m * 3) % 50) as f64 / 10.0,
                })
                .collect(),
        ),
        user_image: None,
    })
}

fn bench_average(c: &mut Criterion) {
    let user = create_user(5);

    c.bench_function("average_match_level", |b| {
        b.iter(|| average_match_level(black_box(&user.matches)));
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut criteria = FilterCriteria::default();
    criteria.set(FilterField::InterestedIn, "eng");
    criteria.set(FilterField::MinMatchLevel, "1.5");

    let mut group = c.benchmark_group("filter_and_sort");

    for user_count in [10, 100, 1000, 10000].iter() {
        let users: Vec<User> = (0..*user_count).map(create_user).collect();

        group.bench_with_input(
            BenchmarkId::new("match_level_desc", user_count),
            user_count,
            |b, _| {
                b.iter(|| {
                    let kept = apply_filters(black_box(&criteria), &users);
                    sort_users(kept, SortConfig::default())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("first_name_asc", user_count),
            user_count,
            |b, _| {
                b.iter(|| {
                    let kept = apply_filters(black_box(&criteria), &users);
                    sort_users(kept, SortConfig::new(SortKey::FirstName, SortDirection::Asc))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_average, bench_pipeline);
criterion_main!(benches);
