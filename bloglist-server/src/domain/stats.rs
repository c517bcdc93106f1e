//! Aggregate statistics over a post collection.
//!
//! Every function is pure over the slice it is given. Ties are resolved in
//! favour of whatever comes first in input order: the first maximal post, or
//! the author whose first post appears earliest.

use std::collections::HashMap;

use serde::Serialize;

use super::post::Post;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FavoritePost {
    pub(crate) title: String,
    pub(crate) likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct AuthorPostCount {
    pub(crate) author: String,
    pub(crate) count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct AuthorLikes {
    pub(crate) author: String,
    pub(crate) likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct PostStatistics {
    pub(crate) total_likes: i64,
    pub(crate) favorite_post: Option<FavoritePost>,
    pub(crate) most_prolific_author: Option<AuthorPostCount>,
    pub(crate) most_liked_author: Option<AuthorLikes>,
}

pub(crate) fn total_likes(posts: &[Post]) -> i64 {
    posts.iter().map(|post| post.likes).sum()
}

pub(crate) fn favorite_post(posts: &[Post]) -> Option<FavoritePost> {
    let mut iter = posts.iter();
    let first = iter.next()?;
    let best = iter.fold(first, |best, post| if post.likes > best.likes { post } else { best });

    Some(FavoritePost {
        title: best.title.clone(),
        likes: best.likes,
    })
}

/// Author with the most posts.
///
/// Precondition: `posts` is non-empty. Empty input has no answer and yields
/// `None`; callers check for emptiness before asking.
pub(crate) fn most_prolific_author(posts: &[Post]) -> Option<AuthorPostCount> {
    let (author, count) = max_by_author(posts, |_| 1_i64)?;
    Some(AuthorPostCount {
        author,
        count: count as usize,
    })
}

/// Author whose posts collected the most likes in total.
///
/// Precondition: `posts` is non-empty, same as [`most_prolific_author`].
pub(crate) fn most_liked_author(posts: &[Post]) -> Option<AuthorLikes> {
    let (author, likes) = max_by_author(posts, |post| post.likes)?;
    Some(AuthorLikes { author, likes })
}

/// Runs every reduction, invoking the author reductions only on a non-empty
/// collection.
pub(crate) fn summarize(posts: &[Post]) -> PostStatistics {
    if posts.is_empty() {
        return PostStatistics {
            total_likes: 0,
            favorite_post: None,
            most_prolific_author: None,
            most_liked_author: None,
        };
    }

    PostStatistics {
        total_likes: total_likes(posts),
        favorite_post: favorite_post(posts),
        most_prolific_author: most_prolific_author(posts),
        most_liked_author: most_liked_author(posts),
    }
}

/// Groups by author in first-occurrence order, summing `weight`, then picks
/// the first group with a strictly greater total.
fn max_by_author<F>(posts: &[Post], weight: F) -> Option<(String, i64)>
where
    F: Fn(&Post) -> i64,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, i64)> = Vec::new();

    for post in posts {
        let slot = *index.entry(post.author.as_str()).or_insert_with(|| {
            groups.push((post.author.as_str(), 0));
            groups.len() - 1
        });
        groups[slot].1 += weight(post);
    }

    let mut iter = groups.into_iter();
    let first = iter.next()?;
    let (author, total) = iter.fold(first, |best, group| if group.1 > best.1 { group } else { best });
    Some((author.to_string(), total))
}
