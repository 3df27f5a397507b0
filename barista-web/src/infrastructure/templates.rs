use std::error::Error as _;

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

pub(crate) const HOME: &str = "home.html";
pub(crate) const BLOGS: &str = "blogs.html";
pub(crate) const BLOG: &str = "blog.html";
pub(crate) const REGISTER: &str = "register.html";
pub(crate) const NOT_FOUND: &str = "404.html";

const REQUIRED: [&str; 5] = [HOME, BLOGS, BLOG, REGISTER, NOT_FOUND];

#[derive(Debug, Error)]
pub(crate) enum TemplateError {
    #[error("failed to load templates: {0}")]
    Load(#[source] tera::Error),

    #[error("template {0} is missing")]
    Missing(&'static str),

    #[error("failed to render {name}: {detail}")]
    Render { name: String, detail: String },
}

/// Набор шаблонов: разбирается один раз при старте, дальше только чтение.
#[derive(Debug)]
pub(crate) struct Templates {
    tera: Tera,
}

impl Templates {
    pub(crate) fn load(glob: &str) -> Result<Self, TemplateError> {
        let tera = Tera::new(glob).map_err(TemplateError::Load)?;
        Self::checked(tera)
    }

    #[cfg(test)]
    pub(crate) fn from_raw(sources: &[(&str, &str)]) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(sources.iter().copied())
            .map_err(TemplateError::Load)?;
        Self::checked(tera)
    }

    fn checked(tera: Tera) -> Result<Self, TemplateError> {
        let names: Vec<&str> = tera.get_template_names().collect();
        if let Some(missing) = REQUIRED.into_iter().find(|name| !names.contains(name)) {
            return Err(TemplateError::Missing(missing));
        }
        Ok(Self { tera })
    }

    pub(crate) fn render(&self, name: &str, context: &Context) -> Result<String, TemplateError> {
        self.tera
            .render(name, context)
            .map_err(|err| render_error(name, &err))
    }

    /// Рендерит `name`, кладя поля `value` на верхний уровень контекста.
    pub(crate) fn render_value<T: Serialize>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<String, TemplateError> {
        let context = Context::from_serialize(value).map_err(|err| render_error(name, &err))?;
        self.render(name, &context)
    }
}

fn render_error(name: &str, err: &tera::Error) -> TemplateError {
    TemplateError::Render {
        name: name.to_string(),
        // полезная часть сообщения tera лежит в цепочке source
        detail: err
            .source()
            .map_or_else(|| err.to_string(), |source| source.to_string()),
    }
}
