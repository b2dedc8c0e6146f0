use chrono::Utc;
use donar_api::{
    config::AppConfig,
    db::{create_orm_conn, sync_schema},
    entity::{Products, Users, donations, products, users},
    services::user_service::hash_password,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    sync_schema(&orm).await?;

    let ana = ensure_user(&orm, "demo-ana", "ana@example.com", "ana123", "Ana").await?;
    let beto = ensure_user(&orm, "demo-beto", "beto@example.com", "beto123", "Beto").await?;
    seed_products(&orm, ana, beto).await?;

    println!("Seed completed. Ana: {ana}, Beto: {beto}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    id: &str,
    email: &str,
    password: &str,
    nombre: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(orm)
        .await?
    {
        println!("User {email} already present");
        return Ok(existing.object_id);
    }

    let now = Utc::now().fixed_offset();
    let user = users::ActiveModel {
        object_id: Set(Uuid::new_v4()),
        id: Set(id.to_string()),
        email: Set(email.to_string()),
        username: Set(Some(id.to_string())),
        nombre: Set(Some(nombre.to_string())),
        apellido: Set(None),
        imagen: Set(None),
        zona: Set(Some("Córdoba".into())),
        ubicacion: Set(Some("Córdoba".into())),
        telefono: Set(None),
        mostrar_contacto: Set(false),
        password_hash: Set(hash_password(password)?),
        transacciones: Set(serde_json::json!([])),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(orm)
    .await?;

    println!("Created user {email}");
    Ok(user.object_id)
}

async fn seed_products(orm: &DatabaseConnection, ana: Uuid, beto: Uuid) -> anyhow::Result<()> {
    let catalog = vec![
        (ana, "Bicicleta rodado 26", "Deportes", "bici.jpg", "usado", 45000),
        (ana, "Set de ollas", "Hogar", "ollas.jpg", "nuevo", 18000),
        (beto, "Libros de primaria", "Educación", "libros.jpg", "usado", 6000),
        (beto, "Campera de abrigo", "Ropa", "campera.jpg", "usado", 12000),
    ];

    for (owner, title, categoria, image, condicion, valor) in catalog {
        let exists = Products::find()
            .filter(products::Column::Title.eq(title))
            .one(orm)
            .await?;
        if exists.is_some() {
            continue;
        }

        let product = products::ActiveModel {
            object_id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            description: Set(Some(format!("{title} para donar"))),
            categoria: Set(Some(categoria.to_string())),
            image: Set(None),
            images: Set(serde_json::json!([image])),
            provincia: Set(Some("Córdoba".into())),
            owner_id: Set(owner),
            condicion: Set(Some(condicion.to_string())),
            valor_estimado: Set(Some(valor)),
            disponible: Set(true),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(orm)
        .await?;

        donations::ActiveModel {
            object_id: Set(Uuid::new_v4()),
            donor_id: Set(owner),
            product_id: Set(Some(product.object_id)),
            status: Set(donations::STATUS_DELIVERED.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
