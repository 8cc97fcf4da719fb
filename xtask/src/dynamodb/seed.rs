//! Seed command implementation.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use postdesk_core::post::POST_ID;

use super::error::{DynamodbError, Result};

/// BatchWriteItem accepts at most 25 requests.
const BATCH_SIZE: usize = 25;

/// A generated sample post.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPost {
    pub post_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

const TITLES: [&str; 8] = [
    "Hello, world",
    "Notes from the road",
    "Why we moved to serverless",
    "A week of small fixes",
    "Release notes",
    "Reading list",
    "Postmortem: the slow Tuesday",
    "Ideas for next quarter",
];

const BODIES: [&str; 4] = [
    "Short and sweet.",
    "A longer post with a few paragraphs of thoughts.\n\nAnd a second paragraph.",
    "Bullet points:\n- one\n- two\n- three",
    "Draft. More to come.",
];

/// Generate `count` sample posts, one hour apart, ending at `now`.
pub fn generate_seed_posts(count: u32, now: DateTime<Utc>) -> Vec<SeedPost> {
    (0..count)
        .map(|i| {
            let i = i as usize;
            let round = i / TITLES.len();
            let title = match round {
                0 => TITLES[i].to_string(),
                n => format!("{} ({})", TITLES[i % TITLES.len()], n + 1),
            };

            SeedPost {
                post_id: Uuid::new_v4(),
                title,
                body: BODIES[i % BODIES.len()].to_string(),
                created_at: now - Duration::hours(i as i64),
            }
        })
        .collect()
}

/// Convert a sample post to a DynamoDB item.
fn post_to_item(post: &SeedPost) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            POST_ID.to_string(),
            AttributeValue::S(post.post_id.to_string()),
        ),
        ("title".to_string(), AttributeValue::S(post.title.clone())),
        ("body".to_string(), AttributeValue::S(post.body.clone())),
        (
            "createdAt".to_string(),
            AttributeValue::S(post.created_at.to_rfc3339()),
        ),
    ])
}

/// Insert posts into DynamoDB.
pub async fn seed_posts(client: &Client, table_name: &str, posts: &[SeedPost]) -> Result<u32> {
    let mut inserted = 0;

    for chunk in posts.chunks(BATCH_SIZE) {
        let write_requests = chunk
            .iter()
            .map(|post| {
                PutRequest::builder()
                    .set_item(Some(post_to_item(post)))
                    .build()
                    .map(|put| WriteRequest::builder().put_request(put).build())
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let response = client
            .batch_write_item()
            .request_items(table_name, write_requests)
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

        let unprocessed = response
            .unprocessed_items()
            .and_then(|items| items.get(table_name))
            .map_or(0, Vec::len);

        inserted += (chunk.len() - unprocessed) as u32;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_generates_requested_count_with_unique_ids() {
        let posts = generate_seed_posts(30, now());

        assert_eq!(posts.len(), 30);
        let ids: HashSet<Uuid> = posts.iter().map(|p| p.post_id).collect();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn test_titles_repeat_with_suffix() {
        let posts = generate_seed_posts(10, now());

        assert_eq!(posts[0].title, "Hello, world");
        assert_eq!(posts[8].title, "Hello, world (2)");
    }

    #[test]
    fn test_created_at_steps_back_hourly() {
        let posts = generate_seed_posts(3, now());

        assert_eq!(posts[0].created_at, now());
        assert_eq!(posts[2].created_at, now() - Duration::hours(2));
    }

    #[test]
    fn test_item_is_keyed_by_post_id() {
        let post = &generate_seed_posts(1, now())[0];
        let item = post_to_item(post);

        assert_eq!(
            item.get("postId").unwrap().as_s().unwrap(),
            &post.post_id.to_string()
        );
        assert_eq!(
            item.get("createdAt").unwrap().as_s().unwrap(),
            "2024-05-01T12:00:00+00:00"
        );
        assert_eq!(item.len(), 4);
    }

    #[test]
    fn test_zero_count() {
        assert!(generate_seed_posts(0, now()).is_empty());
    }
}
