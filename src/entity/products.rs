use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub object_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub categoria: Option<String>,
    pub image: Option<String>,
    pub images: Json,
    pub provincia: Option<String>,
    pub owner_id: Uuid,
    pub condicion: Option<String>,
    pub valor_estimado: Option<i64>,
    pub disponible: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::ObjectId"
    )]
    Owner,
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
    #[sea_orm(has_many = "super::donations::Entity")]
    Donations,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl Related<super::donations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
