use basehours_core::db::open_db_in_memory;
use basehours_core::{
    ClientDto, ClientRequest, ClientService, NoopAuditSink, OutcomeKind, ProjectRequest,
    ProjectService, ProjectUpdateRequest, RequestContext, SqliteClientRepository,
    SqliteProjectRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

type Projects<'conn> = ProjectService<
    SqliteProjectRepository<'conn>,
    SqliteClientRepository<'conn>,
    NoopAuditSink,
>;

fn project_service(conn: &Connection) -> Projects<'_> {
    ProjectService::new(
        SqliteProjectRepository::try_new(conn).unwrap(),
        SqliteClientRepository::try_new(conn).unwrap(),
        NoopAuditSink,
    )
}

fn create_client(conn: &Connection, name: &str) -> ClientDto {
    let clients = ClientService::new(SqliteClientRepository::try_new(conn).unwrap(), NoopAuditSink);
    clients
        .create(
            &RequestContext::new(),
            &ClientRequest {
                name: name.to_string(),
            },
        )
        .data
        .unwrap()
}

fn project(client_id: Uuid, name: &str) -> ProjectRequest {
    ProjectRequest {
        client_id,
        name: name.to_string(),
    }
}

#[test]
fn clients_and_projects_scenario() {
    let conn = open_db_in_memory().unwrap();
    let ctx = RequestContext::new();
    let clients = ClientService::new(SqliteClientRepository::try_new(&conn).unwrap(), NoopAuditSink);
    let projects = project_service(&conn);

    let acme = clients.create(&ctx, &ClientRequest { name: "Acme".to_string() });
    assert_eq!(acme.kind, OutcomeKind::Created);
    let acme = acme.data.unwrap();

    let duplicate = clients.create(&ctx, &ClientRequest { name: "ACME".to_string() });
    assert_eq!(duplicate.kind, OutcomeKind::ValidationError);

    let website = projects.create(&ctx, &project(acme.id, "Website"));
    assert_eq!(website.kind, OutcomeKind::Created);
    let website = website.data.unwrap();
    assert_eq!(website.client_id, acme.id);
    assert_eq!(website.client_name, "Acme");

    let same_client = projects.create(&ctx, &project(acme.id, "WEBSITE"));
    assert_eq!(same_client.kind, OutcomeKind::ValidationError);
    assert_eq!(
        same_client.message,
        "A project with this name already exists for this client."
    );

    let globex = clients
        .create(&ctx, &ClientRequest { name: "Globex".to_string() })
        .data
        .unwrap();
    let other_client = projects.create(&ctx, &project(globex.id, "WEBSITE"));
    assert_eq!(other_client.kind, OutcomeKind::Created);

    assert_eq!(projects.get_all(&ctx).data.unwrap().len(), 2);
}

#[test]
fn create_under_unknown_client_is_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let projects = project_service(&conn);

    let response = projects.create(&RequestContext::new(), &project(Uuid::now_v7(), "Orphan"));
    assert_eq!(response.kind, OutcomeKind::ValidationError);
    assert_eq!(response.message, "Associated client not found.");
}

#[test]
fn create_with_short_name_is_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let acme = create_client(&conn, "Acme");
    let projects = project_service(&conn);

    let response = projects.create(&RequestContext::new(), &project(acme.id, "UI"));
    assert_eq!(response.kind, OutcomeKind::ValidationError);
    assert_eq!(response.message, "Name must have at least 3 characters.");
}

#[test]
fn rename_keeps_client_and_rejects_short_names() {
    let conn = open_db_in_memory().unwrap();
    let acme = create_client(&conn, "Acme");
    let projects = project_service(&conn);
    let ctx = RequestContext::new();
    let created = projects
        .create(&ctx, &project(acme.id, "Website"))
        .data
        .unwrap();

    let rejected = projects.update(
        &ctx,
        &ProjectUpdateRequest {
            id: created.id,
            name: "ab ".to_string(),
        },
    );
    assert_eq!(rejected.kind, OutcomeKind::ValidationError);
    let stored = projects
        .get_by_id(&ctx, &created.id.to_string())
        .data
        .unwrap();
    assert_eq!(stored.name, "Website");

    let renamed = projects.update(
        &ctx,
        &ProjectUpdateRequest {
            id: created.id,
            name: " Mobile App ".to_string(),
        },
    );
    assert_eq!(renamed.kind, OutcomeKind::Updated);
    let renamed = renamed.data.unwrap();
    assert_eq!(renamed.name, "Mobile App");
    assert_eq!(renamed.client_id, acme.id);
    assert_eq!(renamed.client_name, "Acme");
}

#[test]
fn delete_and_read_missing_projects() {
    let conn = open_db_in_memory().unwrap();
    let acme = create_client(&conn, "Acme");
    let projects = project_service(&conn);
    let ctx = RequestContext::new();
    let created = projects
        .create(&ctx, &project(acme.id, "Website"))
        .data
        .unwrap();

    assert_eq!(projects.delete(&ctx, created.id).kind, OutcomeKind::Deleted);
    assert_eq!(projects.delete(&ctx, created.id).kind, OutcomeKind::NotFound);
    let missing = projects.get_by_id(&ctx, &created.id.to_string());
    assert_eq!(missing.kind, OutcomeKind::NotFound);
    assert_eq!(missing.message, format!("Project ID {} not found.", created.id));
    assert_eq!(
        projects.get_by_id(&ctx, "1234").kind,
        OutcomeKind::ValidationError
    );
}

#[test]
fn deleting_client_with_projects_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let acme = create_client(&conn, "Acme");
    let projects = project_service(&conn);
    let ctx = RequestContext::new();
    projects
        .create(&ctx, &project(acme.id, "Website"))
        .data
        .unwrap();

    let clients = ClientService::new(SqliteClientRepository::try_new(&conn).unwrap(), NoopAuditSink);
    let response = clients.delete(&ctx, acme.id);
    assert_eq!(response.kind, OutcomeKind::ValidationError);
    assert_eq!(
        response.message,
        "Client has associated projects and cannot be deleted."
    );
}

#[test]
fn search_without_matches_is_success() {
    let conn = open_db_in_memory().unwrap();
    let acme = create_client(&conn, "Acme");
    let projects = project_service(&conn);
    let ctx = RequestContext::new();
    projects
        .create(&ctx, &project(acme.id, "Website"))
        .data
        .unwrap();

    let none = projects.search_by_name(&ctx, "mobile");
    assert_eq!(none.kind, OutcomeKind::Success);
    assert_eq!(none.message, "No projects found with the name 'mobile'.");
    assert_eq!(none.data, Some(Vec::new()));

    let hits = projects.search_by_name(&ctx, "WEB").data.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].client_name, "Acme");
}
