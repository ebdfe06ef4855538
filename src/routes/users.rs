//! Profile and registration pages.

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::registration::RegistrationPageData;
use crate::forms::registration::RegisterUserForm;
use crate::repository::HttpRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::profile::load_profile;
use crate::services::registration::{
    PendingRegistrations, REGISTRATION_SUCCEEDED, RegistrationForm,
};

#[get("/")]
pub async fn index() -> impl Responder {
    redirect("/users/new")
}

#[get("/users/new")]
/// Show an empty registration form.
pub async fn show_registration(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let form = RegistrationForm::new();

    let mut context = base_context(&flash_messages, "register");
    context.insert("form", &RegistrationPageData::from(&form));

    render_template(&tera, "users/register.html", &context)
}

#[post("/users/new")]
/// Validate and submit the registration form.
pub async fn register_user(
    repo: web::Data<HttpRepository>,
    pending: web::Data<PendingRegistrations>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let values: RegisterUserForm = match serde_html_form::from_bytes(&body) {
        Ok(values) => values,
        Err(err) => {
            log::error!("Failed to parse registration form: {err}");
            FlashMessage::error("Invalid form submission.").send();
            return redirect("/users/new");
        }
    };

    let mut form = RegistrationForm::with_values(values);

    match form
        .submit_exclusive(repo.get_ref(), pending.get_ref())
        .await
    {
        Ok(user) => {
            log::info!("Registered user {}", user.id);
            FlashMessage::success(REGISTRATION_SUCCEEDED).send();
            redirect("/users/new")
        }
        Err(ServiceError::Form(_) | ServiceError::Rejected(_) | ServiceError::InFlight) => {
            let mut context = base_context(&flash_messages, "register");
            context.insert("form", &RegistrationPageData::from(&form));

            render_template(&tera, "users/register.html", &context)
        }
    }
}

#[get("/users/{id}")]
/// Show the profile of one user.
pub async fn show_user(
    id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let view = load_profile(repo.get_ref(), Some(id.as_str())).await;

    let mut context = base_context(&flash_messages, "profile");
    context.insert("view", &view);

    render_template(&tera, "users/profile.html", &context)
}
