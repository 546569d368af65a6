use std::collections::{HashMap, HashSet};

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    apply_filters, samples, AppError, Assessment, AssessmentSubmission, Course, CourseCategory,
    CourseRequest, CourseStatus, Domain, EnrollRequest, Enrollment, FetchOutcome, Module,
    TabFilter, ValidateRequest,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription,
    CardFooter, CardHeader, CardTitle, ConfirmDialog, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormRow, FormSelect,
    Input, Modal, PageHeader, ProgressBar, SearchBar, SearchInput, SkeletonRows, StatusBadge,
    TabBar, TabItem, Textarea, ToastOptions,
};

use crate::auth::use_auth;
use crate::components::{ErrorPanel, FallbackNotice, ModuleGate};
use crate::format_helpers::{blank_to_none, opt_number, opt_text, parse_opt_f64};
use crate::hooks::{field_error, outcome, use_action_failures, use_debounced_search, use_fallback_policy};

#[derive(Debug, Clone, PartialEq)]
struct CourseForm {
    title: String,
    description: String,
    category: String,
    duration_hours: String,
    instructor: String,
    status: String,
}

impl CourseForm {
    fn from_request(req: &CourseRequest) -> Self {
        Self {
            title: req.title.clone(),
            description: req.description.clone().unwrap_or_default(),
            category: req.category.as_str().to_string(),
            duration_hours: opt_number(req.duration_hours),
            instructor: req.instructor.clone().unwrap_or_default(),
            status: req.status.as_str().to_string(),
        }
    }

    fn to_request(&self) -> CourseRequest {
        let defaults = CourseRequest::default();
        CourseRequest {
            title: self.title.trim().to_string(),
            description: blank_to_none(&self.description),
            category: CourseCategory::parse(&self.category).unwrap_or(defaults.category),
            duration_hours: parse_opt_f64(&self.duration_hours),
            instructor: blank_to_none(&self.instructor),
            status: CourseStatus::parse(&self.status).unwrap_or(defaults.status),
        }
    }
}

/// One answer per non-blank line.
fn answers_from(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn enrolled_courses(enrollments: &[Enrollment]) -> HashSet<i64> {
    enrollments.iter().map(|e| e.course_id).collect()
}

fn course_title(courses: &[Course], enrollment: &Enrollment) -> String {
    enrollment
        .course_title
        .clone()
        .or_else(|| courses.iter().find(|c| c.id == enrollment.course_id).map(|c| c.title.clone()))
        .unwrap_or_else(|| format!("Course #{}", enrollment.course_id))
}

fn score_badge(assessment: &Assessment) -> (BadgeVariant, String) {
    match (assessment.passed(), assessment.score) {
        (Some(true), Some(score)) => (BadgeVariant::Success, format!("Passed ({score:.0})")),
        (Some(false), Some(score)) => (BadgeVariant::Danger, format!("Failed ({score:.0})")),
        _ => (BadgeVariant::Neutral, "Not taken".to_string()),
    }
}

/// Course catalog, the user's enrollments and course assessments.
#[component]
pub fn Training() -> Element {
    rsx! {
        ModuleGate { module: Module::Training,
            TrainingCenter {}
        }
    }
}

#[component]
fn TrainingCenter() -> Element {
    let mut section = use_signal(|| "courses".to_string());
    let tabs = vec![
        TabItem::new("courses", "Courses"),
        TabItem::new("enrollments", "My Learning"),
        TabItem::new("assessments", "Assessments"),
    ];
    let active = section.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./training.css") }

        div { class: "training-page",
            PageHeader {
                title: "Training".to_string(),
                subtitle: Some("Courses, progress and assessments".to_string()),
            }

            TabBar {
                tabs,
                active: active.clone(),
                on_select: move |value: String| section.set(value),
            }

            match active.as_str() {
                "enrollments" => rsx! { EnrollmentList {} },
                "assessments" => rsx! { AssessmentList {} },
                _ => rsx! { CourseCatalog {} },
            }
        }
    }
}

#[component]
fn CourseCatalog() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let policy = use_fallback_policy();
    let mut search = use_debounced_search();
    let mut category_tab = use_signal(|| "all".to_string());

    let list_client = client.clone();
    let mut courses = use_resource(move || {
        let client = list_client.clone();
        async move {
            let result = api::training::list_courses(&client).await;
            outcome(result, policy, samples::sample_courses)
        }
    });

    let enrolled_client = client.clone();
    let mut enrollments = use_resource(move || {
        let client = enrolled_client.clone();
        async move {
            let result = api::training::list_enrollments(&client).await;
            outcome(result, policy, samples::sample_enrollments)
        }
    });

    let can_manage = auth.can_manage(Domain::Training);

    let mut show_form = use_signal(|| false);
    let mut editing: Signal<Option<i64>> = use_signal(|| None);
    let mut form = use_signal(|| CourseForm::from_request(&CourseRequest::default()));
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut deleting: Signal<Option<Course>> = use_signal(|| None);
    let mut busy = use_signal(|| false);

    let finish = use_callback(move |result: Result<&'static str, AppError>| {
        saving.set(false);
        match result {
            Ok(msg) => {
                toast.success(msg.to_string(), ToastOptions::new());
                show_form.set(false);
                courses.restart();
            }
            Err(err) => {
                errors.set(err.field_errors.clone());
                failures.report(err);
            }
        }
    });

    let save_client = client.clone();
    let handle_save = move |_: FormEvent| {
        let request = form.read().to_request();
        if let Err(err) = request.validate_request() {
            errors.set(err.field_errors);
            return;
        }
        errors.set(HashMap::new());
        saving.set(true);
        let client = save_client.clone();
        let target = editing();
        spawn(async move {
            let result = match target {
                Some(id) => api::training::update_course(&client, id, &request).await.map(|_| "Course updated"),
                None => api::training::create_course(&client, &request).await.map(|_| "Course created"),
            };
            finish.call(result);
        });
    };

    let enroll_client = client.clone();
    let enroll = use_callback(move |course: Course| {
        let client = enroll_client.clone();
        spawn(async move {
            let request = EnrollRequest {
                course_id: course.id,
                employee_id: None,
            };
            match api::training::enroll(&client, &request).await {
                Ok(_) => {
                    toast.success(format!("Enrolled in {}", course.title), ToastOptions::new());
                    enrollments.restart();
                }
                Err(err) => failures.report(err),
            }
        });
    });

    let delete_client = client.clone();
    let handle_delete = move |_| {
        let Some(course) = deleting() else { return };
        let client = delete_client.clone();
        spawn(async move {
            busy.set(true);
            match api::training::delete_course(&client, course.id).await {
                Ok(()) => {
                    toast.success(format!("{} deleted", course.title), ToastOptions::new());
                    courses.restart();
                }
                Err(err) => failures.report(err),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let open_edit = use_callback(move |course: Course| {
        form.set(CourseForm::from_request(&CourseRequest::from(&course)));
        editing.set(Some(course.id));
        errors.set(HashMap::new());
        show_form.set(true);
    });

    let enrolled = enrollments
        .read()
        .as_ref()
        .and_then(|o| o.data().map(|list| enrolled_courses(list)))
        .unwrap_or_default();

    let mut tabs = vec![TabItem::new("all", "All")];
    tabs.extend(CourseCategory::ALL.iter().map(|c| TabItem::new(c.as_str(), c.label())));
    let tab_filter = CourseCategory::parse(&category_tab.read()).map(TabFilter::Only).unwrap_or_default();
    let query = search.query.read().clone();
    let errs = errors.read().clone();
    let draft = form.read().clone();
    let is_edit = editing().is_some();

    rsx! {
        div { class: "training-toolbar",
            SearchBar {
                SearchInput {
                    value: search.input.read().clone(),
                    placeholder: "Search courses or instructors".to_string(),
                    on_input: move |value: String| search.on_input(value),
                }
            }
            if can_manage {
                Button {
                    onclick: move |_| {
                        form.set(CourseForm::from_request(&CourseRequest::default()));
                        editing.set(None);
                        errors.set(HashMap::new());
                        show_form.set(true);
                    },
                    "New Course"
                }
            }
        }

        TabBar {
            tabs,
            active: category_tab.read().clone(),
            on_select: move |value: String| category_tab.set(value),
        }

        match &*courses.read() {
            None => rsx! { SkeletonRows {} },
            Some(FetchOutcome::Failed(err)) => rsx! {
                ErrorPanel { error: err.clone(), on_retry: move |_| courses.restart() }
            },
            Some(result) => {
                let all = result.data().cloned().unwrap_or_default();
                let sampled = result.is_fallback();
                let visible: Vec<Course> = apply_filters(&all, &query, &tab_filter, |c| c.category)
                    .into_iter()
                    .cloned()
                    .collect();
                rsx! {
                    if let Some(err) = result.error().filter(|_| sampled) {
                        FallbackNotice { error: err.clone() }
                    }
                    if visible.is_empty() {
                        p { class: "training-empty", "No courses match." }
                    }
                    div { class: "course-grid",
                        for course in visible.into_iter() {
                            Card { key: "{course.id}", class: "course-card",
                                CardHeader {
                                    CardTitle { "{course.title}" }
                                    CardDescription { {opt_text(course.description.as_deref())} }
                                }
                                CardContent {
                                    div { class: "course-meta",
                                        Badge { variant: BadgeVariant::Info, "{course.category.label()}" }
                                        StatusBadge {
                                            status: course.status.as_str().to_string(),
                                            label: course.status.label().to_string(),
                                        }
                                    }
                                    dl { class: "course-facts",
                                        dt { "Instructor" }
                                        dd { {opt_text(course.instructor.as_deref())} }
                                        dt { "Duration" }
                                        dd { {course.duration_hours.map(|h| format!("{h} h")).unwrap_or_else(|| "-".to_string())} }
                                    }
                                }
                                CardFooter {
                                    if enrolled.contains(&course.id) {
                                        Badge { variant: BadgeVariant::Success, "Enrolled" }
                                    } else if course.status == CourseStatus::Published {
                                        Button {
                                            variant: ButtonVariant::Secondary,
                                            disabled: sampled,
                                            onclick: {
                                                let course = course.clone();
                                                move |_| enroll.call(course.clone())
                                            },
                                            "Enroll"
                                        }
                                    }
                                    if can_manage && !sampled {
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            onclick: {
                                                let course = course.clone();
                                                move |_| open_edit.call(course.clone())
                                            },
                                            "Edit"
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            onclick: {
                                                let course = course.clone();
                                                move |_| deleting.set(Some(course.clone()))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        Modal {
            open: show_form(),
            title: if is_edit { "Edit Course".to_string() } else { "New Course".to_string() },
            on_close: move |_| show_form.set(false),

            Form { onsubmit: handle_save,
                Input {
                    label: "Title".to_string(),
                    value: draft.title.clone(),
                    required: true,
                    error: field_error(&errs, "title"),
                    on_input: move |evt: FormEvent| form.write().title = evt.value(),
                }
                Textarea {
                    label: "Description".to_string(),
                    value: draft.description.clone(),
                    on_input: move |evt: FormEvent| form.write().description = evt.value(),
                }
                FormRow {
                    FormSelect {
                        label: "Category".to_string(),
                        value: draft.category.clone(),
                        onchange: move |evt: Event<FormData>| form.write().category = evt.value(),
                        for category in CourseCategory::ALL {
                            option { key: "{category.as_str()}", value: category.as_str(), "{category.label()}" }
                        }
                    }
                    FormSelect {
                        label: "Status".to_string(),
                        value: draft.status.clone(),
                        onchange: move |evt: Event<FormData>| form.write().status = evt.value(),
                        for status in CourseStatus::ALL {
                            option { key: "{status.as_str()}", value: status.as_str(), "{status.label()}" }
                        }
                    }
                }
                FormRow {
                    Input {
                        label: "Duration (hours)".to_string(),
                        input_type: "number".to_string(),
                        value: draft.duration_hours.clone(),
                        error: field_error(&errs, "duration_hours"),
                        on_input: move |evt: FormEvent| form.write().duration_hours = evt.value(),
                    }
                    Input {
                        label: "Instructor".to_string(),
                        value: draft.instructor.clone(),
                        on_input: move |evt: FormEvent| form.write().instructor = evt.value(),
                    }
                }
                div { class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| show_form.set(false),
                        "Cancel"
                    }
                    Button {
                        button_type: "submit".to_string(),
                        loading: saving(),
                        disabled: saving(),
                        if is_edit { "Save Changes" } else { "Create Course" }
                    }
                }
            }
        }

        ConfirmDialog {
            open: deleting.read().is_some(),
            title: "Delete course".to_string(),
            message: deleting
                .read()
                .as_ref()
                .map(|c| format!("Delete \"{}\"? Existing enrollments are removed with it.", c.title))
                .unwrap_or_default(),
            busy: busy(),
            on_confirm: handle_delete,
            on_cancel: move |_| deleting.set(None),
        }
    }
}

#[component]
fn EnrollmentList() -> Element {
    let client = use_context::<ApiClient>();
    let policy = use_fallback_policy();

    let list_client = client.clone();
    let mut enrollments = use_resource(move || {
        let client = list_client.clone();
        async move {
            let result = api::training::list_enrollments(&client).await;
            outcome(result, policy, samples::sample_enrollments)
        }
    });

    let course_client = client.clone();
    let courses = use_resource(move || {
        let client = course_client.clone();
        async move { api::training::list_courses(&client).await.unwrap_or_default() }
    });
    let known_courses = courses.read().clone().unwrap_or_default();

    match &*enrollments.read() {
        None => rsx! { SkeletonRows {} },
        Some(FetchOutcome::Failed(err)) => rsx! {
            ErrorPanel { error: err.clone(), on_retry: move |_| enrollments.restart() }
        },
        Some(result) => {
            let list = result.data().cloned().unwrap_or_default();
            rsx! {
                if let Some(err) = result.error().filter(|_| result.is_fallback()) {
                    FallbackNotice { error: err.clone() }
                }
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Course" }
                        DataTableColumn { "Progress" }
                        DataTableColumn { "Status" }
                        DataTableColumn { "Enrolled" }
                    }
                    DataTableBody {
                        if list.is_empty() {
                            DataTableEmpty { colspan: 4, message: "Not enrolled in any course yet.".to_string() }
                        }
                        for enrollment in list.iter() {
                            DataTableRow { key: "{enrollment.id}",
                                DataTableCell { {course_title(&known_courses, enrollment)} }
                                DataTableCell {
                                    div { class: "enrollment-progress",
                                        ProgressBar { value: enrollment.progress_percent() }
                                        span { "{enrollment.progress_percent()}%" }
                                    }
                                }
                                DataTableCell {
                                    StatusBadge {
                                        status: enrollment.status.as_str().to_string(),
                                        label: enrollment.status.label().to_string(),
                                    }
                                }
                                DataTableCell {
                                    {enrollment.enrolled_at.map(|at| at.format("%b %-d, %Y").to_string()).unwrap_or_else(|| "-".to_string())}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AssessmentList() -> Element {
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();

    let list_client = client.clone();
    let mut assessments = use_resource(move || {
        let client = list_client.clone();
        async move { api::training::list_assessments(&client).await }
    });

    let mut taking: Signal<Option<Assessment>> = use_signal(|| None);
    let mut answers = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let submit_client = client.clone();
    let handle_submit = move |_: FormEvent| {
        let Some(assessment) = taking() else { return };
        let submission = AssessmentSubmission {
            answers: answers_from(&answers.read()),
        };
        if submission.answers.is_empty() {
            toast.error("Enter at least one answer.".to_string(), ToastOptions::new());
            return;
        }
        let client = submit_client.clone();
        spawn(async move {
            submitting.set(true);
            match api::training::submit_assessment(&client, assessment.id, &submission).await {
                Ok(graded) => {
                    let msg = match graded.passed() {
                        Some(true) => format!("Passed {}", graded.title),
                        Some(false) => format!("Did not pass {}", graded.title),
                        None => format!("{} submitted", graded.title),
                    };
                    toast.success(msg, ToastOptions::new());
                    taking.set(None);
                    answers.set(String::new());
                    assessments.restart();
                }
                Err(err) => failures.report(err),
            }
            submitting.set(false);
        });
    };

    let current_title = taking.read().as_ref().map(|a| a.title.clone()).unwrap_or_default();

    rsx! {
        match &*assessments.read() {
            None => rsx! { SkeletonRows {} },
            Some(Err(err)) => rsx! {
                ErrorPanel { error: err.clone(), on_retry: move |_| assessments.restart() }
            },
            Some(Ok(list)) => rsx! {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Assessment" }
                        DataTableColumn { "Course" }
                        DataTableColumn { "Passing score" }
                        DataTableColumn { "Result" }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        if list.is_empty() {
                            DataTableEmpty { colspan: 5, message: "No assessments available.".to_string() }
                        }
                        for assessment in list.iter().cloned() {
                            DataTableRow { key: "{assessment.id}",
                                DataTableCell { "{assessment.title}" }
                                DataTableCell { "#{assessment.course_id}" }
                                DataTableCell { "{assessment.passing_score:.0}" }
                                DataTableCell {
                                    {
                                        let (variant, label) = score_badge(&assessment);
                                        rsx! { Badge { variant, "{label}" } }
                                    }
                                }
                                DataTableCell {
                                    if assessment.passed() != Some(true) {
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            onclick: {
                                                let assessment = assessment.clone();
                                                move |_| {
                                                    answers.set(String::new());
                                                    taking.set(Some(assessment.clone()));
                                                }
                                            },
                                            "Take"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
        }

        Modal {
            open: taking.read().is_some(),
            title: current_title,
            on_close: move |_| taking.set(None),

            Form { onsubmit: handle_submit,
                Textarea {
                    label: "Answers, one per line".to_string(),
                    rows: 8,
                    value: answers.read().clone(),
                    on_input: move |evt: FormEvent| answers.set(evt.value()),
                }
                div { class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| taking.set(None),
                        "Cancel"
                    }
                    Button {
                        button_type: "submit".to_string(),
                        loading: submitting(),
                        disabled: submitting(),
                        "Submit"
                    }
                }
            }
        }
    }
}
