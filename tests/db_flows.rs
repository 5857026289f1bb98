// Fluxos contra um Postgres real. Rode com:
//   DATABASE_URL=postgres://... cargo test --test db_flows -- --ignored

mod common;

use rust_decimal::Decimal;
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use arteca_backend::{
    common::error::AppError,
    models::{
        client::NewClient,
        dashboard::DashboardSummary,
        property::{NewProperty, PropertyChanges, PropertyOperation, PropertyStatus},
        sale::{NewSale, SaleStatus},
        user::{CreateUserPayload, User, UserRole},
    },
    AppState,
};
use common::state_with_pool;

// Um fluxo por vez: o resumo do dashboard conta o banco inteiro
static SERIAL: Mutex<()> = Mutex::const_new(());

async fn setup() -> (AppState, PgPool, MutexGuard<'static, ()>) {
    let serial = SERIAL.lock().await;
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL para os testes de banco");
    let pool = PgPool::connect(&url).await.unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    (state_with_pool(pool.clone()), pool, serial)
}

async fn agent(state: &AppState, role: UserRole) -> User {
    state
        .auth_service
        .create_user(CreateUserPayload {
            email: format!("{}@arteca.pe", Uuid::new_v4().simple()),
            password: "123456".into(),
            full_name: "Agente de Teste".into(),
            phone: None,
            role: Some(role),
        })
        .await
        .unwrap()
}

fn property_for(agent_id: Uuid, owner_id: Option<Uuid>) -> NewProperty {
    NewProperty {
        title: "Casa de teste".into(),
        description: None,
        address: Some("Av. Costanera 1".into()),
        city: None,
        price: Decimal::new(10_000_000, 2),
        currency: None,
        commission_pct: None,
        operation: PropertyOperation::Venta,
        agent_id,
        owner_id,
        is_exclusive: None,
    }
}

fn sale_for(property_id: Uuid, agent_id: Uuid) -> NewSale {
    NewSale {
        property_id,
        final_price: Decimal::new(9_500_000, 2),
        total_commission: Decimal::new(285_000, 2),
        listing_agent_id: agent_id,
        is_shared: None,
        external_agency: None,
        shared_pct: None,
        selling_agent_id: None,
    }
}

#[tokio::test]
#[ignore]
async fn client_with_properties_cannot_be_deleted() {
    let (state, _pool, _serial) = setup().await;
    let agent = agent(&state, UserRole::Agente).await;

    let client = state
        .client_service
        .create(NewClient {
            full_name: "Ana".into(),
            dni_ruc: None,
            phone: None,
            email: None,
            is_owner: false,
            notes: None,
        })
        .await
        .unwrap();

    let property = state
        .property_service
        .create(property_for(agent.id, Some(client.id)))
        .await
        .unwrap();

    let err = state.client_service.delete(client.id).await.unwrap_err();
    assert!(matches!(err, AppError::ClientHasProperties));
    assert!(state.client_service.get(client.id).await.is_ok());

    state.property_service.delete(property.id).await.unwrap();
    let outcome = state.client_service.delete(client.id).await.unwrap();
    assert_eq!(outcome.affected_rows, 1);
}

#[tokio::test]
#[ignore]
async fn property_delete_cascades_documents_and_sales() {
    let (state, pool, _serial) = setup().await;
    let agent = agent(&state, UserRole::Agente).await;
    let property = state
        .property_service
        .create(property_for(agent.id, None))
        .await
        .unwrap();

    for name in ["plano.pdf", "partida.pdf"] {
        state
            .document_repo
            .add(name, "https://files.example.com/x", Some("PDF"), property.id)
            .await
            .unwrap();
    }
    state
        .sale_service
        .register(sale_for(property.id, agent.id))
        .await
        .unwrap();

    let deletion = state.property_service.delete(property.id).await.unwrap();
    assert_eq!(deletion.documents_deleted, 2);
    assert_eq!(deletion.sales_deleted, 1);

    let leftovers: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM documents WHERE property_id = $1) + (SELECT COUNT(*) FROM sales WHERE property_id = $1)",
    )
    .bind(property.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(leftovers, 0);

    // Segunda vez: nada a apagar, nada é apagado
    assert!(matches!(
        state.property_service.delete(property.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore]
async fn approval_marks_property_sold_exactly_once() {
    let (state, _pool, _serial) = setup().await;
    let seller = agent(&state, UserRole::Agente).await;
    let admin = agent(&state, UserRole::Admin).await;

    let property = state
        .property_service
        .create(property_for(seller.id, None))
        .await
        .unwrap();
    let sale = state
        .sale_service
        .register(sale_for(property.id, seller.id))
        .await
        .unwrap();
    assert_eq!(sale.status, SaleStatus::Pendiente);

    // Registrar não muda o imóvel
    let detail = state.property_service.get_detail(property.id).await.unwrap();
    assert_eq!(detail.listing.property.status, PropertyStatus::Disponible);

    let approved = state.sale_service.approve(sale.id, admin.id).await.unwrap();
    assert_eq!(approved.status, SaleStatus::Aprobado);
    assert_eq!(approved.approved_by, Some(admin.id));

    let detail = state.property_service.get_detail(property.id).await.unwrap();
    assert_eq!(detail.listing.property.status, PropertyStatus::Vendido);

    assert!(matches!(
        state.sale_service.approve(sale.id, admin.id).await,
        Err(AppError::SaleAlreadyApproved)
    ));

    // Imóvel vendido não sai de VENDIDO por edição
    let changes = PropertyChanges {
        status: Some(PropertyStatus::Disponible),
        ..Default::default()
    };
    assert!(matches!(
        state.property_service.update(property.id, changes).await,
        Err(AppError::StatusLocked)
    ));
}

#[tokio::test]
#[ignore]
async fn report_filters_by_closing_date() {
    let (state, _pool, _serial) = setup().await;
    let agent = agent(&state, UserRole::Agente).await;
    let property = state
        .property_service
        .create(property_for(agent.id, None))
        .await
        .unwrap();
    let sale = state
        .sale_service
        .register(sale_for(property.id, agent.id))
        .await
        .unwrap();

    // Folga de um dia para não depender do fuso da sessão
    let today = sale.closed_at.date_naive();
    let (start, end) = (today.pred_opt().unwrap(), today.succ_opt().unwrap());
    let rows = state.sale_service.report(start, end).await.unwrap();
    assert!(rows.iter().any(|row| row.sale_id == sale.id));

    let past = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let rows = state.sale_service.report(past, past).await.unwrap();
    assert!(rows.iter().all(|row| row.sale_id != sale.id));
}

#[tokio::test]
#[ignore]
async fn duplicate_email_is_a_business_error() {
    let (state, _pool, _serial) = setup().await;
    let existing = agent(&state, UserRole::Agente).await;

    let err = state
        .auth_service
        .create_user(CreateUserPayload {
            email: existing.email.clone(),
            password: "123456".into(),
            full_name: "Outro".into(),
            phone: None,
            role: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmailAlreadyExists));
}

fn status_count(summary: &DashboardSummary, status: PropertyStatus) -> i64 {
    summary
        .properties
        .iter()
        .find(|row| row.status == status)
        .map_or(0, |row| row.count)
}

#[tokio::test]
#[ignore]
async fn clients_are_listed_newest_first() {
    let (state, _pool, _serial) = setup().await;

    let mut ids = Vec::new();
    for name in ["Aaron", "Zoila"] {
        let client = state
            .client_service
            .create(NewClient {
                full_name: name.into(),
                dni_ruc: None,
                phone: None,
                email: None,
                is_owner: false,
                notes: None,
            })
            .await
            .unwrap();
        ids.push(client.id);
    }

    let listed: Vec<Uuid> = state
        .client_service
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|client| client.id)
        .collect();
    let position = |id| listed.iter().position(|listed_id| *listed_id == id).unwrap();
    assert!(position(ids[1]) < position(ids[0]));
}

#[tokio::test]
#[ignore]
async fn dashboard_counts_this_month_only() {
    let (state, pool, _serial) = setup().await;
    let before = state.dashboard_service.get_summary().await;

    let seller = agent(&state, UserRole::Agente).await;
    let admin = agent(&state, UserRole::Admin).await;

    let mut sales = Vec::new();
    for _ in 0..2 {
        let property = state
            .property_service
            .create(property_for(seller.id, None))
            .await
            .unwrap();
        let sale = state
            .sale_service
            .register(sale_for(property.id, seller.id))
            .await
            .unwrap();
        sales.push(sale);
    }
    state.sale_service.approve(sales[0].id, admin.id).await.unwrap();

    let after = state.dashboard_service.get_summary().await;
    assert_eq!(after.active_agents - before.active_agents, 2);
    assert_eq!(after.pending_sales - before.pending_sales, 1);
    assert_eq!(
        after.monthly_sales.sales_count - before.monthly_sales.sales_count,
        1
    );
    assert_eq!(
        after.monthly_sales.total_income - before.monthly_sales.total_income,
        Decimal::new(285_000, 2)
    );
    assert_eq!(
        status_count(&after, PropertyStatus::Vendido) - status_count(&before, PropertyStatus::Vendido),
        1
    );
    assert_eq!(
        status_count(&after, PropertyStatus::Disponible)
            - status_count(&before, PropertyStatus::Disponible),
        1
    );

    // Aprovada, mas fechada no mês que vem: fora do card do mês
    state.sale_service.approve(sales[1].id, admin.id).await.unwrap();
    sqlx::query("UPDATE sales SET closed_at = date_trunc('month', NOW()) + interval '1 month' WHERE id = $1")
        .bind(sales[1].id)
        .execute(&pool)
        .await
        .unwrap();

    let later = state.dashboard_service.get_summary().await;
    assert_eq!(later.monthly_sales, after.monthly_sales);
    assert_eq!(later.pending_sales, after.pending_sales - 1);
}

#[tokio::test]
#[ignore]
async fn created_post_reports_its_id_and_author() {
    let (state, _pool, _serial) = setup().await;
    let author = agent(&state, UserRole::Agente).await;

    let outcome = state
        .post_repo
        .create("Reunião", "Segunda às 9h", "AVISO", author.id)
        .await
        .unwrap();
    assert_eq!(outcome.affected_rows, 1);

    let id = outcome.last_id.unwrap();
    let post = state.post_repo.find(id).await.unwrap().unwrap();
    assert_eq!(post.post.id, id);
    assert_eq!(post.author_name, "Agente de Teste");
}
