use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// A listable resource type. Its tag names both list keys and invalidation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    VideoGames,
    Editors,
    Categories,
    Users,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::VideoGames,
        Resource::Editors,
        Resource::Categories,
        Resource::Users,
    ];

    /// Resource tag used as the list key prefix.
    pub fn tag(&self) -> &'static str {
        match self {
            Resource::VideoGames => "videogames",
            Resource::Editors => "editors",
            Resource::Categories => "categories",
            Resource::Users => "users",
        }
    }

    /// Cache tags to purge after a write to this resource. Editor and
    /// category writes also purge the game lists.
    pub fn invalidation_tags(&self) -> Vec<String> {
        match self {
            Resource::VideoGames => vec![cache_tag(Resource::VideoGames)],
            Resource::Editors => vec![
                cache_tag(Resource::Editors),
                cache_tag(Resource::VideoGames),
            ],
            Resource::Categories => vec![
                cache_tag(Resource::Categories),
                cache_tag(Resource::VideoGames),
            ],
            Resource::Users => vec![cache_tag(Resource::Users)],
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returns the cache key for one page of a resource list.
///
/// # Examples
///
/// ```
/// use gamecatalog_core::cache::{list_key, Resource};
/// use gamecatalog_core::pagination::Pagination;
///
/// let page = Pagination::new(2, 25).unwrap();
/// assert_eq!(list_key(Resource::VideoGames, page), "videogames_list-2-25");
/// ```
pub fn list_key(resource: Resource, pagination: Pagination) -> String {
    format!(
        "{}_list-{}-{}",
        resource.tag(),
        pagination.page,
        pagination.limit
    )
}

/// Returns the tag attached to every cached page of a resource.
pub fn cache_tag(resource: Resource) -> String {
    format!("{}Cache", resource.tag())
}

/// Returns the key of the set tracking every cache key stored under `tag`.
///
/// Used by backends without native tag support so invalidation does not
/// need a key scan.
pub fn tag_tracking_key(tag: &str) -> String {
    format!("tag:{tag}:_keys")
}
