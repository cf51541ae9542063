diesel::table! {
    generation_tasks (id) {
        id -> Text,
        kind -> Text,
        parent_ref -> Text,
        status -> Text,
        progress -> Integer,
        result_ref -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    documents (id) {
        id -> Text,
        project_id -> Text,
        doc_type -> Text,
        content -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    source_codes (id) {
        id -> Text,
        project_id -> Text,
        file_name -> Text,
        content -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    quality_checks (id) {
        id -> Text,
        project_id -> Text,
        check_type -> Text,
        result -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    work_estimates (id) {
        id -> Text,
        project_id -> Text,
        estimate -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    proposals (id) {
        id -> Text,
        project_id -> Text,
        user_id -> Text,
        content -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    progress_reports (id) {
        id -> Text,
        project_id -> Text,
        report -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    projects (id) {
        id -> Text,
        name -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    uploaded_files (id) {
        id -> Text,
        project_id -> Text,
        file_name -> Text,
        content -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    templates (id) {
        id -> Text,
        name -> Text,
        content -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    sessions (token) {
        token -> Text,
        user_id -> Text,
        created_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    generation_tasks,
    documents,
    source_codes,
    quality_checks,
    work_estimates,
    proposals,
    progress_reports,
    projects,
    uploaded_files,
    templates,
    sessions,
);
