use basehours_core::db::open_db_in_memory;
use basehours_core::{
    ClientRequest, ClientService, ClientUpdateRequest, NoopAuditSink, OutcomeKind,
    RequestContext, SqliteClientRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn service(conn: &Connection) -> ClientService<SqliteClientRepository<'_>, NoopAuditSink> {
    ClientService::new(SqliteClientRepository::try_new(conn).unwrap(), NoopAuditSink)
}

fn request(name: &str) -> ClientRequest {
    ClientRequest {
        name: name.to_string(),
    }
}

#[test]
fn create_returns_created_dto() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = RequestContext::new();

    let response = service.create(&ctx, &request("  Acme "));
    assert_eq!(response.kind, OutcomeKind::Created);
    assert_eq!(response.message, "Client created successfully.");
    let dto = response.data.unwrap();
    assert_eq!(dto.name, "Acme");

    let fetched = service.get_by_id(&ctx, &dto.id.to_string());
    assert_eq!(fetched.kind, OutcomeKind::Success);
    assert_eq!(fetched.data.unwrap(), dto);
}

#[test]
fn second_create_with_equivalent_name_is_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = RequestContext::new();

    assert_eq!(service.create(&ctx, &request("José")).kind, OutcomeKind::Created);

    for duplicate in ["JOSE", " jose ", "jósé"] {
        let response = service.create(&ctx, &request(duplicate));
        assert_eq!(response.kind, OutcomeKind::ValidationError, "{duplicate}");
        assert_eq!(response.message, "A client with this name already exists.");
        assert!(response.data.is_none());
    }
    assert_eq!(service.get_all(&ctx).data.unwrap().len(), 1);
}

#[test]
fn create_with_invalid_name_reports_rule() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = RequestContext::new();

    let empty = service.create(&ctx, &request("   "));
    assert_eq!(empty.kind, OutcomeKind::ValidationError);
    assert_eq!(empty.message, "Name cannot be empty.");

    let short = service.create(&ctx, &request("ab"));
    assert_eq!(short.kind, OutcomeKind::ValidationError);
    assert_eq!(short.message, "Name must have at least 3 characters.");
}

#[test]
fn rename_to_short_name_keeps_stored_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = RequestContext::new();
    let created = service.create(&ctx, &request("Acme")).data.unwrap();

    let response = service.update(
        &ctx,
        &ClientUpdateRequest {
            id: created.id,
            name: "  x ".to_string(),
        },
    );
    assert_eq!(response.kind, OutcomeKind::ValidationError);
    assert_eq!(response.message, "Name must have at least 3 characters.");

    let stored = service.get_by_id(&ctx, &created.id.to_string()).data.unwrap();
    assert_eq!(stored.name, "Acme");
}

#[test]
fn rename_updates_name_and_rejects_taken_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = RequestContext::new();
    let acme = service.create(&ctx, &request("Acme")).data.unwrap();
    service.create(&ctx, &request("Globex")).data.unwrap();

    let renamed = service.update(
        &ctx,
        &ClientUpdateRequest {
            id: acme.id,
            name: "Acme Holdings".to_string(),
        },
    );
    assert_eq!(renamed.kind, OutcomeKind::Updated);
    assert_eq!(renamed.data.unwrap().name, "Acme Holdings");

    let taken = service.update(
        &ctx,
        &ClientUpdateRequest {
            id: acme.id,
            name: "GLOBEX".to_string(),
        },
    );
    assert_eq!(taken.kind, OutcomeKind::ValidationError);
    assert_eq!(taken.message, "A client with this name already exists.");
}

#[test]
fn update_missing_client_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let id = Uuid::now_v7();

    let response = service.update(
        &RequestContext::new(),
        &ClientUpdateRequest {
            id,
            name: "Anything".to_string(),
        },
    );
    assert_eq!(response.kind, OutcomeKind::NotFound);
    assert_eq!(response.message, format!("Client ID {id} not found."));
}

#[test]
fn delete_existing_then_missing() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = RequestContext::new();
    let created = service.create(&ctx, &request("Acme")).data.unwrap();

    let deleted = service.delete(&ctx, created.id);
    assert_eq!(deleted.kind, OutcomeKind::Deleted);
    assert_eq!(deleted.data, Some(created.id));

    let again = service.delete(&ctx, created.id);
    assert_eq!(again.kind, OutcomeKind::NotFound);
}

#[test]
fn malformed_id_is_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let response = service.get_by_id(&RequestContext::new(), "not-a-uuid");
    assert_eq!(response.kind, OutcomeKind::ValidationError);
    assert_eq!(response.message, "Invalid client ID format.");
    assert_eq!(response.kind.status_code(), 400);
}

#[test]
fn unknown_well_formed_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let response = service.get_by_id(&RequestContext::new(), &Uuid::now_v7().to_string());
    assert_eq!(response.kind, OutcomeKind::NotFound);
}

#[test]
fn empty_listing_and_search_are_success() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = RequestContext::new();

    let all = service.get_all(&ctx);
    assert_eq!(all.kind, OutcomeKind::Success);
    assert_eq!(all.message, "No clients found.");
    assert_eq!(all.data, Some(Vec::new()));

    service.create(&ctx, &request("Acme")).data.unwrap();
    let none = service.search_by_name(&ctx, "globex");
    assert_eq!(none.kind, OutcomeKind::Success);
    assert_eq!(none.message, "No clients found with the name 'globex'.");
    assert_eq!(none.data, Some(Vec::new()));

    let some = service.search_by_name(&ctx, "acm");
    assert_eq!(some.message, "Clients found with the name 'acm'. Total: 1.");
    assert_eq!(service.get_all(&ctx).message, "Clients retrieved successfully. Total: 1.");
}

#[test]
fn names_with_unstorable_keys_are_validation_errors() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = RequestContext::new();

    let marks_only = service.create(&ctx, &request("\u{301}\u{301}\u{301}"));
    assert_eq!(marks_only.kind, OutcomeKind::ValidationError);
    assert_eq!(marks_only.message, "Name cannot be empty.");

    let expanding = service.create(&ctx, &request(&"ß".repeat(200)));
    assert_eq!(expanding.kind, OutcomeKind::ValidationError);
    assert_eq!(
        expanding.message,
        "Normalized name must have at most 255 characters."
    );

    let created = service.create(&ctx, &request(&"ß".repeat(120))).data.unwrap();
    let renamed = service.update(
        &ctx,
        &ClientUpdateRequest {
            id: created.id,
            name: "ß".repeat(150),
        },
    );
    assert_eq!(renamed.kind, OutcomeKind::ValidationError);
    assert_eq!(service.get_all(&ctx).data.unwrap().len(), 1);
}

#[test]
fn spacing_marks_distinguish_client_names() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = RequestContext::new();

    assert_eq!(service.create(&ctx, &request("राम राम")).kind, OutcomeKind::Created);
    assert_eq!(service.create(&ctx, &request("रम रम")).kind, OutcomeKind::Created);
    assert_eq!(service.search_by_name(&ctx, "राम").data.unwrap().len(), 1);
}

#[test]
fn not_found_wording_matches_across_operations() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = RequestContext::new();
    let id = Uuid::now_v7();
    let expected = format!("Client ID {id} not found.");

    assert_eq!(service.get_by_id(&ctx, &id.to_string()).message, expected);
    assert_eq!(service.delete(&ctx, id).message, expected);
}
