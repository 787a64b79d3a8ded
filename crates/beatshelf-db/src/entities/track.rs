use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One catalog entry. The table is provisioned outside this crate; `id`,
/// `plays`, `likes` and `uploaded_at` are filled in by column defaults.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tracks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub duration: String,
    pub audio_url: String,
    pub cover_url: Option<String>,
    #[sea_orm(default_value = "0")]
    pub plays: i32,
    #[sea_orm(default_value = "0")]
    pub likes: i32,
    pub uploaded_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
