use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde_json::json;

use quizbank_server::entity::{comment, judging_criteria, problem, problem_tag, user};

use crate::common::{TestApp, routes};

mod problem_creation {
    use super::*;

    #[tokio::test]
    async fn create_then_read_returns_the_input_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::PROBLEMS,
                &json!({
                    "problem_text": "What is the capital of France?",
                    "answer": "Paris",
                    "original_text": "Quelle est la capitale de la France ?",
                    "sort_order": 3
                }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let id = res.id("problem_id");
        assert!(res.body["created_at"].is_string());
        assert!(res.body["updated_at"].is_string());

        let fetched = app.get(&routes::problem(id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["problem_id"], id);
        assert_eq!(fetched.body["problem_text"], "What is the capital of France?");
        assert_eq!(fetched.body["answer"], "Paris");
        assert_eq!(
            fetched.body["original_text"],
            "Quelle est la capitale de la France ?"
        );
        assert_eq!(fetched.body["sort_order"], 3);
        assert!(fetched.body["genre_id"].is_null());
        assert_eq!(fetched.body["tags"], json!([]));
        assert_eq!(fetched.body["judging_criteria"], json!([]));
    }

    #[tokio::test]
    async fn one_criterion_creates_exactly_one_row() {
        let app = TestApp::spawn().await;

        let id = app
            .create_problem_with(&json!({
                "problem_text": "Name the largest planet.",
                "answer": "Jupiter",
                "judging_criteria": [
                    {"criteria_type": "accuracy", "criteria_text": "Must be correct"}
                ]
            }))
            .await;

        let rows = judging_criteria::Entity::find()
            .filter(judging_criteria::Column::ProblemId.eq(id))
            .all(&app.db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].problem_id, id);
        assert_eq!(rows[0].criteria_type, "accuracy");
        assert_eq!(rows[0].criteria_text, "Must be correct");

        let fetched = app.get(&routes::problem(id)).await;
        let criteria = fetched.body["judging_criteria"].as_array().unwrap();
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0]["problem_id"], id);
    }

    #[tokio::test]
    async fn tags_are_attached_on_create() {
        let app = TestApp::spawn().await;
        let group = app.create_tag_group("Difficulty").await;
        let easy = app.create_tag(group, "Easy").await;
        let hard = app.create_tag(group, "Hard").await;

        let res = app
            .post(
                routes::PROBLEMS,
                &json!({
                    "problem_text": "2 + 2",
                    "answer": "4",
                    "tags": [hard, easy, easy]
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let mut expected = vec![easy, hard];
        expected.sort();
        assert_eq!(res.body["tags"], json!(expected));
    }

    #[tokio::test]
    async fn unknown_tag_is_not_found_and_nothing_is_written() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::PROBLEMS,
                &json!({"problem_text": "Q", "answer": "A", "tags": [999]}),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "Tag not found");

        let list = app.get(routes::PROBLEMS).await;
        assert_eq!(list.body, json!([]));
    }

    #[tokio::test]
    async fn unknown_genre_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::PROBLEMS,
                &json!({"problem_text": "Q", "answer": "A", "genre_id": 42}),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Genre not found");
    }

    #[tokio::test]
    async fn missing_required_field_is_rejected_with_empty_body() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::PROBLEMS, &json!({"problem_text": "No answer"}))
            .await;

        assert_eq!(res.status, 422);
        assert_eq!(res.body, json!({}));
    }

    #[tokio::test]
    async fn blank_problem_text_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::PROBLEMS, &json!({"problem_text": "  ", "answer": "A"}))
            .await;

        assert_eq!(res.status, 422);
        assert_eq!(res.body, json!({}));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_with_empty_body() {
        let app = TestApp::spawn().await;

        let res = app.post_raw(routes::PROBLEMS, "{\"problem_text\": ").await;

        assert_eq!(res.status, 422);
        assert_eq!(res.body, json!({}));
    }

    #[tokio::test]
    async fn slashless_collection_path_is_routed() {
        let app = TestApp::spawn().await;

        let res = app
            .post("/problems", &json!({"problem_text": "Q", "answer": "A"}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let list = app.get("/problems").await;
        assert_eq!(list.status, 200);
        assert_eq!(list.body.as_array().unwrap().len(), 1);
    }
}

mod problem_listing {
    use super::*;

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::PROBLEMS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn tag_filter_returns_only_tagged_problems() {
        let app = TestApp::spawn().await;
        let group = app.create_tag_group("Topic").await;
        let tag = app.create_tag(group, "Geography").await;

        app.create_problem("Problem 1").await;
        let tagged = app
            .create_problem_with(&json!({
                "problem_text": "Problem 2",
                "answer": "A",
                "tags": [tag]
            }))
            .await;
        app.create_problem("Problem 3").await;

        let res = app
            .get(&format!("{}?tag_id={tag}", routes::PROBLEMS))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["problem_id"], tagged);
    }

    #[tokio::test]
    async fn repeated_tag_ids_match_any_tag_once() {
        let app = TestApp::spawn().await;
        let group = app.create_tag_group("Topic").await;
        let a = app.create_tag(group, "A").await;
        let b = app.create_tag(group, "B").await;

        app.create_problem_with(&json!({"problem_text": "both", "answer": "x", "tags": [a, b]}))
            .await;
        app.create_problem_with(&json!({"problem_text": "only b", "answer": "x", "tags": [b]}))
            .await;
        app.create_problem("none").await;

        let res = app
            .get(&format!("{}?tag_id={a}&tag_id={b}", routes::PROBLEMS))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.problem_texts(), vec!["both", "only b"]);
    }

    #[tokio::test]
    async fn order_by_problem_text_descending() {
        let app = TestApp::spawn().await;
        app.create_problem("Problem 1").await;
        app.create_problem("Problem 2").await;

        let res = app
            .get(&format!(
                "{}?order_by=problem_text&order_dir=DESC",
                routes::PROBLEMS
            ))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.problem_texts(), vec!["Problem 2", "Problem 1"]);
    }

    #[tokio::test]
    async fn multiple_sort_keys_apply_in_order() {
        let app = TestApp::spawn().await;
        app.create_problem_with(&json!({"problem_text": "b", "answer": "x", "sort_order": 1}))
            .await;
        app.create_problem_with(&json!({"problem_text": "c", "answer": "x", "sort_order": 0}))
            .await;
        app.create_problem_with(&json!({"problem_text": "a", "answer": "x", "sort_order": 1}))
            .await;

        let res = app
            .get(&format!(
                "{}?order_by=sort_order,problem_text",
                routes::PROBLEMS
            ))
            .await;

        assert_eq!(res.problem_texts(), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn unknown_order_by_is_ignored() {
        let app = TestApp::spawn().await;
        app.create_problem("second").await;
        app.create_problem("first").await;

        let res = app
            .get(&format!("{}?order_by=nonexistent_field", routes::PROBLEMS))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.problem_texts(), vec!["second", "first"]);
    }

    #[tokio::test]
    async fn keyword_matches_case_insensitively() {
        let app = TestApp::spawn().await;
        app.create_problem("What is the Capital of France?").await;
        app.create_problem("Largest ocean?").await;
        app.create_problem("100% sure?").await;

        let res = app
            .get(&format!("{}?keyword=capital", routes::PROBLEMS))
            .await;
        assert_eq!(res.problem_texts(), vec!["What is the Capital of France?"]);

        let wildcard = app
            .get(&format!("{}?keyword=%25", routes::PROBLEMS))
            .await;
        assert_eq!(wildcard.problem_texts(), vec!["100% sure?"]);
    }

    #[tokio::test]
    async fn genre_filter_and_zero_genre() {
        let app = TestApp::spawn().await;
        let genre = app.create_genre("Science").await;
        app.create_problem_with(&json!({"problem_text": "in genre", "answer": "x", "genre_id": genre}))
            .await;
        app.create_problem("no genre").await;

        let filtered = app
            .get(&format!("{}?genre_id={genre}", routes::PROBLEMS))
            .await;
        assert_eq!(filtered.problem_texts(), vec!["in genre"]);

        let unfiltered = app.get(&format!("{}?genre_id=0", routes::PROBLEMS)).await;
        assert_eq!(unfiltered.problem_texts().len(), 2);
    }

    #[tokio::test]
    async fn malformed_query_is_rejected_with_empty_body() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&format!("{}?genre_id=abc", routes::PROBLEMS))
            .await;

        assert_eq!(res.status, 422);
        assert_eq!(res.body, json!({}));
    }

    #[tokio::test]
    async fn keyword_with_non_ascii_letters_matches() {
        let app = TestApp::spawn().await;
        app.create_problem("École question").await;
        app.create_problem("Ｆｕｌｌ width text").await;
        app.create_problem("Plain question").await;

        let accented = app
            .get(&format!("{}?keyword=École QUESTION", routes::PROBLEMS))
            .await;
        assert_eq!(accented.status, 200, "{}", accented.text);
        assert_eq!(accented.problem_texts(), vec!["École question"]);

        let wide = app
            .get(&format!("{}?keyword=Ｆｕｌｌ", routes::PROBLEMS))
            .await;
        assert_eq!(wide.problem_texts(), vec!["Ｆｕｌｌ width text"]);
    }

    #[tokio::test]
    async fn whitespace_keyword_is_a_filter() {
        let app = TestApp::spawn().await;
        app.create_problem("two words").await;
        app.create_problem("oneword").await;

        let res = app.get(&format!("{}?keyword=%20", routes::PROBLEMS)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.problem_texts(), vec!["two words"]);
    }

    #[tokio::test]
    async fn tag_sort_orders_by_tag_name_with_untagged_last() {
        let app = TestApp::spawn().await;
        let group = app.create_tag_group("Topic").await;
        let tag_b = app.create_tag(group, "b").await;
        let tag_a = app.create_tag(group, "a").await;

        app.create_problem_with(&json!({"problem_text": "tagged b", "answer": "x", "tags": [tag_b]}))
            .await;
        app.create_problem_with(&json!({"problem_text": "tagged a", "answer": "x", "tags": [tag_a]}))
            .await;
        app.create_problem("untagged").await;

        let asc = app
            .get(&format!("{}?order_by=tag_name", routes::PROBLEMS))
            .await;
        assert_eq!(asc.status, 200, "{}", asc.text);
        assert_eq!(asc.problem_texts(), vec!["tagged a", "tagged b", "untagged"]);

        let desc = app
            .get(&format!(
                "{}?order_by=tag_id&order_dir=DESC",
                routes::PROBLEMS
            ))
            .await;
        assert_eq!(desc.status, 200, "{}", desc.text);
        assert_eq!(desc.problem_texts(), vec!["tagged b", "tagged a", "untagged"]);
    }

    #[tokio::test]
    async fn only_uppercase_desc_reverses_order() {
        let app = TestApp::spawn().await;
        app.create_problem("Problem 1").await;
        app.create_problem("Problem 2").await;

        let res = app
            .get(&format!(
                "{}?order_by=problem_text&order_dir=desc",
                routes::PROBLEMS
            ))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.problem_texts(), vec!["Problem 1", "Problem 2"]);
    }
}

mod problem_update {
    use super::*;

    #[tokio::test]
    async fn updating_one_field_keeps_the_rest() {
        let app = TestApp::spawn().await;
        let id = app
            .create_problem_with(&json!({
                "problem_text": "Original question",
                "answer": "Original answer",
                "original_text": "source",
                "sort_order": 5
            }))
            .await;

        let res = app
            .put(&routes::problem(id), &json!({"answer": "New answer"}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["answer"], "New answer");
        assert_eq!(res.body["problem_text"], "Original question");
        assert_eq!(res.body["original_text"], "source");
        assert_eq!(res.body["sort_order"], 5);

        let fetched = app.get(&routes::problem(id)).await;
        assert_eq!(fetched.body["answer"], "New answer");
        assert_eq!(fetched.body["problem_text"], "Original question");
    }

    #[tokio::test]
    async fn explicit_null_clears_nullable_field() {
        let app = TestApp::spawn().await;
        let id = app
            .create_problem_with(&json!({
                "problem_text": "Q",
                "answer": "A",
                "original_text": "source"
            }))
            .await;

        let res = app
            .put(&routes::problem(id), &json!({"original_text": null}))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["original_text"].is_null());
    }

    #[tokio::test]
    async fn tags_replace_and_criteria_append() {
        let app = TestApp::spawn().await;
        let group = app.create_tag_group("Topic").await;
        let old_tag = app.create_tag(group, "Old").await;
        let new_tag = app.create_tag(group, "New").await;
        let id = app
            .create_problem_with(&json!({
                "problem_text": "Q",
                "answer": "A",
                "tags": [old_tag],
                "judging_criteria": [{"criteria_type": "accuracy", "criteria_text": "exact"}]
            }))
            .await;

        let res = app
            .put(
                &routes::problem(id),
                &json!({
                    "tags": [new_tag],
                    "judging_criteria": [{"criteria_type": "style", "criteria_text": "concise"}]
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["tags"], json!([new_tag]));
        let criteria = res.body["judging_criteria"].as_array().unwrap();
        assert_eq!(criteria.len(), 2);
        assert_eq!(criteria[0]["criteria_type"], "accuracy");
        assert_eq!(criteria[1]["criteria_type"], "style");
    }

    #[tokio::test]
    async fn empty_update_changes_nothing() {
        let app = TestApp::spawn().await;
        let id = app.create_problem("Q").await;
        let before = app.get(&routes::problem(id)).await;

        let res = app.put(&routes::problem(id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, before.body);
    }

    #[tokio::test]
    async fn updating_missing_problem_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(&routes::problem(999), &json!({"answer": "x"}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Problem not found");
    }
}

mod problem_deletion {
    use super::*;

    #[tokio::test]
    async fn deleted_problem_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_problem("Q").await;

        let res = app.delete(&routes::problem(id)).await;
        assert_eq!(res.status, 204);

        let fetched = app.get(&routes::problem(id)).await;
        assert_eq!(fetched.status, 404);
        assert_eq!(fetched.body["code"], "NOT_FOUND");

        let again = app.delete(&routes::problem(id)).await;
        assert_eq!(again.status, 404);
    }

    #[tokio::test]
    async fn dependents_are_removed_with_the_problem() {
        let app = TestApp::spawn().await;
        let group = app.create_tag_group("Topic").await;
        let tag = app.create_tag(group, "T").await;
        let id = app
            .create_problem_with(&json!({
                "problem_text": "Q",
                "answer": "A",
                "tags": [tag],
                "judging_criteria": [{"criteria_type": "accuracy", "criteria_text": "exact"}]
            }))
            .await;
        app.create_comment(id, &json!({"body": "Looks good"})).await;

        let res = app.delete(&routes::problem(id)).await;
        assert_eq!(res.status, 204);

        let criteria = judging_criteria::Entity::find()
            .filter(judging_criteria::Column::ProblemId.eq(id))
            .count(&app.db)
            .await
            .unwrap();
        let comments = comment::Entity::find()
            .filter(comment::Column::ProblemId.eq(id))
            .count(&app.db)
            .await
            .unwrap();
        let links = problem_tag::Entity::find()
            .filter(problem_tag::Column::ProblemId.eq(id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!((criteria, comments, links), (0, 0, 0));

        // the tag itself survives
        assert_eq!(app.get(&routes::tag(tag)).await.status, 200);
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected_with_empty_body() {
        let app = TestApp::spawn().await;

        let res = app.get("/problems/abc").await;

        assert_eq!(res.status, 422);
        assert_eq!(res.body, json!({}));
    }
}

mod problem_audit_columns {
    use super::*;

    async fn insert_user(app: &TestApp, username: &str) -> i32 {
        let now = chrono::Utc::now();
        let row = user::ActiveModel {
            username: Set(username.into()),
            email: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        row.insert(&app.db).await.expect("insert user").user_id
    }

    fn problem_by(user_id: i32) -> problem::ActiveModel {
        let now = chrono::Utc::now();
        problem::ActiveModel {
            problem_text: Set("Authored".into()),
            answer: Set("A".into()),
            created_at: Set(now),
            updated_at: Set(now),
            created_by: Set(Some(user_id)),
            updated_by: Set(Some(user_id)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn creator_and_updater_reference_users() {
        let app = TestApp::spawn().await;
        let author = insert_user(&app, "editor").await;

        let row = problem_by(author).insert(&app.db).await.expect("insert problem");

        let fetched = app.get(&routes::problem(row.problem_id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["created_by"], author);
        assert_eq!(fetched.body["updated_by"], author);
    }

    #[tokio::test]
    async fn unknown_creator_is_rejected_by_the_schema() {
        let app = TestApp::spawn().await;

        let result = problem_by(4242).insert(&app.db).await;

        assert!(result.is_err());
    }
}
