//! Boilerplate templates for the generator commands.

use minijinja::Environment;
use serde::Serialize;

use crate::domain::AppError;

const ACTION_TEMPLATE: &str = include_str!("templates/action.php.jinja");
const DTO_TEMPLATE: &str = include_str!("templates/dto.php.jinja");

/// Build the template environment with both generator templates registered.
fn build_environment() -> Result<Environment<'static>, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);

    env.add_template("action.php", ACTION_TEMPLATE)
        .map_err(|e| AppError::Template(format!("Failed to register 'action.php': {}", e)))?;
    env.add_template("dto.php", DTO_TEMPLATE)
        .map_err(|e| AppError::Template(format!("Failed to register 'dto.php': {}", e)))?;

    Ok(env)
}

/// Render a registered template with the given context.
pub fn render<S: Serialize>(template_name: &str, ctx: &S) -> Result<String, AppError> {
    let env = build_environment()?;
    let template = env
        .get_template(template_name)
        .map_err(|e| AppError::Template(format!("Failed to load '{}': {}", template_name, e)))?;

    template
        .render(ctx)
        .map_err(|e| AppError::Template(format!("Failed to render '{}': {}", template_name, e)))
}
