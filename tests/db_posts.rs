use sqlx::PgPool;

use quire::application::pagination::Pagination;
use quire::application::repos::{
    CategoriesRepo, ListParams, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use quire::domain::types::PostStatus;
use quire::infra::db::PostgresRepositories;

async fn seed(pool: &PgPool) -> i64 {
    sqlx::query("INSERT INTO categories (id, title) VALUES (1, 'Tech'), (2, 'Life'), (3, 'Travel')")
        .execute(pool)
        .await
        .expect("insert categories");

    sqlx::query_scalar(
        "INSERT INTO posts (title, content, status, category_id) \
         VALUES ('Hello', '# Heading', 'published', 2) RETURNING id",
    )
    .fetch_one(pool)
    .await
    .expect("insert post")
}

#[sqlx::test(migrations = "./migrations")]
async fn find_post_reads_status_and_category(pool: PgPool) {
    let id = seed(&pool).await;
    let repos = PostgresRepositories::new(pool);

    let post = repos.find_post(id).await.expect("find").expect("post exists");

    assert_eq!(post.title, "Hello");
    assert_eq!(post.status, PostStatus::Published);
    assert_eq!(post.category_id, 2);
    assert!(repos.find_post(id + 1000).await.expect("find").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn update_post_returns_the_stored_row(pool: PgPool) {
    let id = seed(&pool).await;
    let repos = PostgresRepositories::new(pool);

    let updated = repos
        .update_post(UpdatePostParams {
            id,
            title: "Hello again".into(),
            content: "Body".into(),
            status: PostStatus::Draft,
            category_id: 1,
        })
        .await
        .expect("update");

    assert_eq!(updated.status, PostStatus::Draft);
    assert_eq!(updated.category_id, 1);
    assert!(updated.updated_at >= updated.created_at);

    let reloaded = repos.find_post(id).await.expect("find").expect("post");
    assert_eq!(reloaded.title, "Hello again");
}

#[sqlx::test(migrations = "./migrations")]
async fn update_post_reports_missing_rows_and_bad_categories(pool: PgPool) {
    let id = seed(&pool).await;
    let repos = PostgresRepositories::new(pool);

    let missing = repos
        .update_post(UpdatePostParams {
            id: id + 1000,
            title: "Ghost".into(),
            content: "boo".into(),
            status: PostStatus::Draft,
            category_id: 1,
        })
        .await;
    assert!(matches!(missing, Err(RepoError::NotFound)));

    let dangling = repos
        .update_post(UpdatePostParams {
            id,
            title: "Hello".into(),
            content: "# Heading".into(),
            status: PostStatus::Published,
            category_id: 99,
        })
        .await;
    assert!(matches!(dangling, Err(RepoError::InvalidInput { .. })));
}

#[sqlx::test(migrations = "./migrations")]
async fn categories_are_paged_by_id(pool: PgPool) {
    seed(&pool).await;
    let repos = PostgresRepositories::new(pool);

    let first = repos
        .list_categories(&ListParams::page(Pagination::new(1, 2).expect("pagination")))
        .await
        .expect("first page");
    let second = repos
        .list_categories(&ListParams::page(Pagination::new(2, 2).expect("pagination")))
        .await
        .expect("second page");

    assert_eq!(first.total, 3);
    let titles: Vec<_> = first
        .items
        .iter()
        .chain(second.items.iter())
        .map(|category| category.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Tech", "Life", "Travel"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn categories_can_be_searched_and_found_by_id(pool: PgPool) {
    seed(&pool).await;
    let repos = PostgresRepositories::new(pool);

    let params = ListParams {
        pagination: Pagination::default(),
        search: Some("tr".into()),
    };
    let page = repos.list_categories(&params).await.expect("search");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "Travel");

    let found = repos.find_categories(&[3, 1, 42]).await.expect("find");
    let ids: Vec<_> = found.iter().map(|category| category.id).collect();
    assert_eq!(ids, vec![1, 3]);
}
