//! End-to-end coverage of the engine's bootstrap and metadata-read path:
//! fixture package on disk, standard dispatcher, driver on top.

use crtdb_context::PackageContext;
use crtdb_core::wellknown;
use crtdb_driver::{
    standard_dispatcher, ConnectionState, DriverError, EmulationOptions, MockConnection,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::{uuid, Uuid};

const PACKAGE_UID: Uuid = uuid!("11111111-1111-1111-1111-111111111111");
const CONTACT_SCHEMA_UID: Uuid = uuid!("22222222-2222-2222-2222-222222222222");
const ACCOUNT_SCHEMA_UID: Uuid = uuid!("33333333-3333-3333-3333-333333333333");
const UNKNOWN_UID: Uuid = uuid!("99999999-9999-9999-9999-999999999999");
const WORKSPACE_ID: Uuid = uuid!("44444444-4444-4444-4444-444444444444");

fn write_schema(package_dir: &Path, name: &str, uid: Uuid) {
    let schema_dir = package_dir.join("Schemas").join(name);
    fs::create_dir_all(&schema_dir).unwrap();
    fs::write(
        schema_dir.join("descriptor.json"),
        format!(
            r#"{{"Descriptor": {{"UId": "{uid}", "Name": "{name}", "ManagerName": "EntitySchemaManager"}}}}"#
        ),
    )
    .unwrap();
    fs::write(
        schema_dir.join("metadata.json"),
        format!(r#"{{"MetaData": {{"Schema": {{"Name": "{name}"}}}}}}"#),
    )
    .unwrap();
}

fn fixture_package() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("descriptor.json"),
        format!(
            r#"{{"Descriptor": {{"UId": "{PACKAGE_UID}", "Name": "CrtFixture", "Type": 0}}}}"#
        ),
    )
    .unwrap();
    write_schema(dir.path(), "Contact", CONTACT_SCHEMA_UID);
    write_schema(dir.path(), "Account", ACCOUNT_SCHEMA_UID);
    dir
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn connection_for(dir: &TempDir, options: EmulationOptions) -> MockConnection {
    init_tracing();
    let context = Arc::new(PackageContext::new(dir.path()));
    let dispatcher = standard_dispatcher(context, options).unwrap();
    let mut connection = MockConnection::new(Arc::new(dispatcher));
    connection.open();
    connection
}

fn connection(dir: &TempDir) -> MockConnection {
    connection_for(dir, EmulationOptions::default())
}

#[test]
fn culture_list_in_cursor_mode() {
    let dir = fixture_package();
    let connection = connection(&dir);

    let mut command = connection.create_command();
    // Deliberately reformatted relative to the reference shape.
    command.set_text("select\t\"Id\", \"Name\", \"Active\"  from \"public\" . \"SysCulture\"");

    let mut reader = command.execute_reader().unwrap();
    assert!(reader.advance());
    assert_eq!(
        reader.value_named("Id").unwrap().as_uuid(),
        Ok(wellknown::CULTURE_EN_US_ID)
    );
    assert_eq!(reader.value_named("Name").unwrap().as_str(), Ok("en-US"));
    assert_eq!(reader.value_named("Active").unwrap().as_bool(), Ok(true));
    assert!(!reader.advance());
}

#[test]
fn settings_lookups_fall_back_to_defaults() {
    let dir = fixture_package();
    let connection = connection(&dir);

    let mut command = connection.create_command();
    command.set_text(
        r#"SELECT "Id", "Name", "Code", "Description", "ValueTypeName", "IsPersonal",
           "IsCacheable", "IsSSPAvailable", "ReferenceSchemaUId"
           FROM "public"."SysSettings" WHERE "Code" = @P1"#,
    );
    let _ = command.parameters_mut().add("P1", "SchemaNamePrefix");

    assert_eq!(command.execute_scalar().unwrap(), None);

    let mut reader = command.execute_reader().unwrap();
    assert!(!reader.advance());
}

#[test]
fn schema_lookup_returns_descriptor_and_metadata() {
    let dir = fixture_package();
    let connection = connection(&dir);

    let mut command = connection.create_command();
    command.set_text(
        r#"SELECT "Id", "UId", "Name", "ManagerName", "MetaData"
           FROM "public"."VwSysSchemaInWorkspace"
           WHERE "UId" = @SchemaUId AND "ManagerName" = @P1
           AND "VwSysSchemaInWorkspace"."SysWorkspaceId" = @P2"#,
    );
    let _ = command.parameters_mut().add("SchemaUId", CONTACT_SCHEMA_UID);
    let _ = command.parameters_mut().add("P1", "EntitySchemaManager");
    let _ = command.parameters_mut().add("P2", WORKSPACE_ID);

    let mut reader = command.execute_reader().unwrap();
    assert!(reader.advance());
    assert_eq!(
        reader.value_named("UId").unwrap().as_uuid(),
        Ok(CONTACT_SCHEMA_UID)
    );
    assert_eq!(reader.value_named("Name").unwrap().as_str(), Ok("Contact"));
    assert_eq!(
        reader.value_named("ManagerName").unwrap().as_str(),
        Ok("EntitySchemaManager")
    );
    let metadata = reader.value_named("MetaData").unwrap().as_bytes().unwrap();
    assert!(metadata.starts_with(b"{\"MetaData\""));
    assert!(!reader.advance());
}

#[test]
fn schema_lookup_for_unknown_uid_is_fatal() {
    let dir = fixture_package();
    let connection = connection(&dir);

    let mut command = connection.create_command();
    command.set_text(
        r#"SELECT "Id", "UId", "Name", "ManagerName", "MetaData"
           FROM "public"."VwSysSchemaInWorkspace"
           WHERE "UId" = @SchemaUId AND "ManagerName" = @P1
           AND "VwSysSchemaInWorkspace"."SysWorkspaceId" = @P2"#,
    );
    let _ = command.parameters_mut().add("SchemaUId", UNKNOWN_UID);
    let _ = command.parameters_mut().add("P1", "EntitySchemaManager");
    let _ = command.parameters_mut().add("P2", WORKSPACE_ID);

    match command.execute_reader() {
        Err(DriverError::SchemaNotFound { uid }) => assert_eq!(uid, UNKNOWN_UID),
        other => panic!("expected SchemaNotFound, got {other:?}"),
    }
}

#[test]
fn default_process_schema_bypasses_context_lookup() {
    let dir = fixture_package();
    let connection = connection_for(
        &dir,
        EmulationOptions {
            default_process_schema_uid: Some(UNKNOWN_UID),
        },
    );

    let mut command = connection.create_command();
    command.set_text(
        r#"SELECT "Id", "UId", "Name", "ManagerName", "MetaData"
           FROM "public"."VwSysSchemaInWorkspace"
           WHERE "UId" = @SchemaUId AND "ManagerName" = @P1
           AND "VwSysSchemaInWorkspace"."SysWorkspaceId" = @P2"#,
    );
    let _ = command.parameters_mut().add("SchemaUId", UNKNOWN_UID);
    let _ = command.parameters_mut().add("P1", "ProcessSchemaManager");
    let _ = command.parameters_mut().add("P2", WORKSPACE_ID);

    let mut reader = command.execute_reader().unwrap();
    assert!(!reader.advance());
}

#[test]
fn package_ownership_is_confirmed_by_schema_id() {
    let dir = fixture_package();
    let connection = connection(&dir);

    let mut command = connection.create_command();
    command.set_text(
        r#"SELECT "PackageUId" FROM "public"."VwSysSchemaInWorkspace"
           WHERE "SysWorkspaceId" = @P1 AND "Id" = @P2"#,
    );
    let _ = command.parameters_mut().add("P1", WORKSPACE_ID);
    let _ = command.parameters_mut().add("P2", ACCOUNT_SCHEMA_UID);

    let value = command.execute_scalar().unwrap().unwrap();
    assert_eq!(value.as_uuid(), Ok(PACKAGE_UID));

    command.parameters_mut().replace("P2", UNKNOWN_UID).unwrap();
    assert!(matches!(
        command.execute_scalar(),
        Err(DriverError::SchemaNotFound { .. })
    ));
}

#[test]
fn hierarchy_parents_collapse_to_the_starting_schema() {
    let dir = fixture_package();
    let connection = connection(&dir);

    let mut command = connection.create_command();
    command.set_text(
        "SELECT * FROM public.\"tsp_GetSysSchemaParentsInPackageHierarchyByPackage\"(@StartSchemaUId, @WorkspaceId)",
    );
    let _ = command
        .parameters_mut()
        .add("StartSchemaUId", CONTACT_SCHEMA_UID);
    let _ = command.parameters_mut().add("WorkspaceId", WORKSPACE_ID);

    let mut reader = command.execute_reader().unwrap();
    assert!(reader.advance());
    assert_eq!(
        reader.value_named("UId").unwrap().as_uuid(),
        Ok(CONTACT_SCHEMA_UID)
    );
    assert_eq!(reader.value_named("PackageLevel").unwrap().as_i64(), Ok(0));
    assert_eq!(
        reader.value_named("ParentId").unwrap().as_uuid(),
        Ok(Uuid::nil())
    );
    assert!(!reader.advance());
}

#[test]
fn supervisor_role_memberships() {
    let dir = fixture_package();
    let connection = connection(&dir);

    let mut command = connection.create_command();
    command.set_text(
        r#"SELECT "User"."Id" "UserId", "User"."ConnectionType" "ConnectionType",
           "SysAdminUnitInRole"."SysAdminUnitRoleId" "RoleId"
           FROM "public"."SysAdminUnitInRole"
           INNER JOIN "public"."SysAdminUnit" "User" ON ("SysAdminUnitInRole"."SysAdminUnitId" = "User"."Id")
           INNER JOIN "public"."SysAdminUnit" "Role" ON ("SysAdminUnitInRole"."SysAdminUnitRoleId" = "Role"."Id")
           WHERE "SysAdminUnitInRole"."SysAdminUnitId" = @P1
           AND "Role"."SysAdminUnitTypeValue" <> @P2
           AND "Role"."SysAdminUnitTypeValue" <> @P3"#,
    );
    let _ = command
        .parameters_mut()
        .add("P1", wellknown::SUPERVISOR_USER_ID);
    let _ = command.parameters_mut().add("P2", 4);
    let _ = command.parameters_mut().add("P3", 5);

    let mut reader = command.execute_reader().unwrap();
    let mut roles = Vec::new();
    while reader.advance() {
        assert_eq!(
            reader.value_named("UserId").unwrap().as_uuid(),
            Ok(wellknown::SUPERVISOR_USER_ID)
        );
        roles.push(reader.value_named("RoleId").unwrap().as_uuid().unwrap());
    }
    assert_eq!(roles, wellknown::SUPERVISOR_ROLE_IDS);
}

#[test]
fn schema_error_report_counts_one_row() {
    let dir = fixture_package();
    let connection = connection(&dir);

    let mut command = connection.create_command();
    command.set_text(
        "UPDATE \"public\".\"SysSchema\" SET \"LastError\" = @P2 WHERE \"Id\" = @P1",
    );
    let _ = command.parameters_mut().add("P1", CONTACT_SCHEMA_UID);
    let _ = command.parameters_mut().add("P2", "CS0103: name does not exist");

    assert_eq!(command.execute_non_query().unwrap(), 1);
}

#[test]
fn unrecognized_statement_never_yields_a_result() {
    let dir = fixture_package();
    let connection = connection(&dir);

    let mut command = connection.create_command();
    command.set_text("SELECT \"Id\" FROM \"public\".\"SysPackage\"");

    match command.execute_reader() {
        Err(DriverError::UnrecognizedStatement { text, .. }) => {
            assert!(text.contains("SysPackage"));
        }
        other => panic!("expected UnrecognizedStatement, got {other:?}"),
    }
}

#[test]
fn dispatch_is_deterministic_across_calls() {
    let dir = fixture_package();
    let connection = connection(&dir);

    let mut command = connection.create_command();
    command.set_text(
        r#"SELECT "PackageUId" FROM "public"."VwSysSchemaInWorkspace"
           WHERE "SysWorkspaceId" = @P1 AND "Id" = @P2"#,
    );
    let _ = command.parameters_mut().add("P1", WORKSPACE_ID);
    let _ = command.parameters_mut().add("P2", CONTACT_SCHEMA_UID);

    let first = command.execute_scalar().unwrap();
    let second = command.execute_scalar().unwrap();
    assert_eq!(first, second);
}

#[test]
fn connection_lifecycle_is_a_pure_state_machine() {
    let dir = fixture_package();
    let mut connection = connection(&dir);

    assert_eq!(connection.state(), ConnectionState::Open);
    assert_eq!(connection.database(), "creatio");
    connection.close();
    assert_eq!(connection.state(), ConnectionState::Closed);
    assert!(connection.begin_transaction().is_err());
}
