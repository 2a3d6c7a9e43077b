//! One generic CRUD wrapper for every collection.
//!
//! # Design
//! `ResourceService<R>` maps domain verbs onto HTTP verbs and paths for the
//! collection `R::COLLECTION`. Every method builds exactly one request,
//! executes it and hands back the envelope untouched. Operations that only
//! some collections support are gated by trait bounds: relation filters need
//! `BelongsTo`, nested collections need `HasMany`, and `partial_update` exists
//! only for posts.

use std::fmt::Display;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::ApiClient;
use crate::config::HarnessConfig;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Album, Comment, Empty, Photo, Post, Todo, User};

/// An entity served from `/{COLLECTION}` and `/{COLLECTION}/{id}`.
pub trait Resource: Serialize + DeserializeOwned {
    type Id: Display + Copy;

    const COLLECTION: &'static str;

    fn id(&self) -> Self::Id;
}

/// An entity carrying a foreign key that the list endpoint can filter on
/// (`/posts?userId=5`).
pub trait BelongsTo: Resource {
    /// Wire name of the foreign-key field.
    const FOREIGN_KEY: &'static str;

    fn foreign_id(&self) -> u64;
}

/// `Self` owns a nested collection of `C` at `/{Self}/{id}/{C}`.
pub trait HasMany<C: Resource>: Resource {}

macro_rules! resource {
    ($entity:ty, $collection:literal) => {
        impl Resource for $entity {
            type Id = u64;
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> u64 {
                self.id
            }
        }
    };
    ($entity:ty, $collection:literal, $key:literal => $field:ident) => {
        resource!($entity, $collection);

        impl BelongsTo for $entity {
            const FOREIGN_KEY: &'static str = $key;

            fn foreign_id(&self) -> u64 {
                self.$field
            }
        }
    };
}

resource!(User, "users");
resource!(Post, "posts", "userId" => user_id);
resource!(Comment, "comments", "postId" => post_id);
resource!(Album, "albums", "userId" => user_id);
resource!(Photo, "photos", "albumId" => album_id);
resource!(Todo, "todos", "userId" => user_id);

impl HasMany<Comment> for Post {}
impl HasMany<Photo> for Album {}
impl HasMany<Post> for User {}
impl HasMany<Album> for User {}
impl HasMany<Todo> for User {}

#[derive(Debug, Clone)]
pub struct ResourceService<R, Tr = UreqTransport> {
    client: ApiClient<Tr>,
    _resource: PhantomData<fn() -> R>,
}

pub type UserService<Tr = UreqTransport> = ResourceService<User, Tr>;
pub type PostService<Tr = UreqTransport> = ResourceService<Post, Tr>;
pub type CommentService<Tr = UreqTransport> = ResourceService<Comment, Tr>;
pub type AlbumService<Tr = UreqTransport> = ResourceService<Album, Tr>;
pub type PhotoService<Tr = UreqTransport> = ResourceService<Photo, Tr>;
pub type TodoService<Tr = UreqTransport> = ResourceService<Todo, Tr>;

impl<R: Resource> ResourceService<R, UreqTransport> {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(ApiClient::from_config(config))
    }
}

impl<R: Resource, Tr: Transport> ResourceService<R, Tr> {
    pub fn new(client: ApiClient<Tr>) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient<Tr> {
        &self.client
    }

    pub fn collection_path() -> String {
        format!("/{}", R::COLLECTION)
    }

    pub fn item_path(id: R::Id) -> String {
        format!("/{}/{id}", R::COLLECTION)
    }

    pub fn get_all(&self) -> Result<Envelope<Vec<R>>, ApiError> {
        let request = self
            .client
            .create_request(&Self::collection_path(), HttpMethod::Get);
        self.client.execute(&request)
    }

    pub fn get_by_id(&self, id: R::Id) -> Result<Envelope<R>, ApiError> {
        let request = self
            .client
            .create_request(&Self::item_path(id), HttpMethod::Get);
        self.client.execute(&request)
    }

    /// Lists the entities whose foreign key equals `related_id`.
    pub fn get_by_relation(&self, related_id: u64) -> Result<Envelope<Vec<R>>, ApiError>
    where
        R: BelongsTo,
    {
        let request = self
            .client
            .create_request(&Self::collection_path(), HttpMethod::Get)
            .with_query(R::FOREIGN_KEY, related_id);
        self.client.execute(&request)
    }

    /// Fetches the nested collection `/{R}/{id}/{C}`.
    pub fn get_related<C>(&self, id: R::Id) -> Result<Envelope<Vec<C>>, ApiError>
    where
        R: HasMany<C>,
        C: Resource,
    {
        let path = format!("{}/{}", Self::item_path(id), C::COLLECTION);
        let request = self.client.create_request(&path, HttpMethod::Get);
        self.client.execute(&request)
    }

    pub fn create(&self, entity: &R) -> Result<Envelope<R>, ApiError> {
        let request = self
            .client
            .create_request_with_body(&Self::collection_path(), HttpMethod::Post, entity)?;
        self.client.execute(&request)
    }

    pub fn update(&self, id: R::Id, entity: &R) -> Result<Envelope<R>, ApiError> {
        let request = self
            .client
            .create_request_with_body(&Self::item_path(id), HttpMethod::Put, entity)?;
        self.client.execute(&request)
    }

    pub fn delete_by_id(&self, id: R::Id) -> Result<Envelope<Empty>, ApiError> {
        let request = self
            .client
            .create_request(&Self::item_path(id), HttpMethod::Delete);
        self.client.execute(&request)
    }
}

impl<Tr: Transport> ResourceService<Post, Tr> {
    /// `PATCH /posts/{id}` with only the given fields.
    pub fn partial_update<B>(&self, id: u64, fields: &B) -> Result<Envelope<Post>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .client
            .create_request_with_body(&Self::item_path(id), HttpMethod::Patch, fields)?;
        self.client.execute(&request)
    }
}
