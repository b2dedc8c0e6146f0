use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub object_id: Uuid,
    #[sea_orm(unique)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub username: Option<String>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub imagen: Option<String>,
    pub zona: Option<String>,
    pub ubicacion: Option<String>,
    pub telefono: Option<String>,
    pub mostrar_contacto: bool,
    pub password_hash: String,
    pub transacciones: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
    #[sea_orm(has_many = "super::products::Entity")]
    Products,
    #[sea_orm(has_many = "super::donations::Entity")]
    Donations,
}

impl Related<super::favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::donations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
