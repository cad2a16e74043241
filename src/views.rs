//! HTML page building. Deliberately plain string assembly: the pages are
//! small enough that a template engine would be more machinery than markup.

use axum::response::Html;

use crate::favorites::repo::Favorite;
use crate::recipes::shape::Recipe;

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Default)]
pub struct HomePage {
    pub username: Option<String>,
    pub login_success: bool,
    pub logout_success: bool,
    pub login_error: Option<String>,
    pub email: Option<String>,
    pub recipes: Vec<Recipe>,
    pub no_results: Option<String>,
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n<body>\n{body}\n\
         <script src=\"/static/app.js\"></script>\n</body>\n</html>\n"
    ))
}

fn nav(username: Option<&str>) -> String {
    match username {
        Some(name) => format!(
            "<nav><span class=\"user\">Logged in as {}</span> \
             <a href=\"/favorites\">My favorites</a> \
             <a href=\"/logout\">Log out</a></nav>",
            escape(name)
        ),
        None => "<nav><a href=\"/register\">Register</a></nav>".to_string(),
    }
}

fn login_form(error: Option<&str>, email: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(message) = error {
        out.push_str(&format!(
            "<p class=\"alert alert-error\">{}</p>",
            escape(message)
        ));
    }
    out.push_str(&format!(
        "<form method=\"post\" action=\"/login\" class=\"login-form\">\
         <input type=\"email\" name=\"email\" placeholder=\"Email\" value=\"{}\">\
         <input type=\"password\" name=\"password\" placeholder=\"Password\">\
         <button type=\"submit\">Log in</button>\
         </form>",
        escape(email.unwrap_or(""))
    ));
    out
}

fn search_form() -> String {
    "<form method=\"post\" action=\"/\" class=\"search-form\">\
     <input type=\"text\" name=\"ingredients\" placeholder=\"Ingredients, e.g. tofu, rice\">\
     <select name=\"diet\">\
     <option value=\"\">Any diet</option>\
     <option value=\"vegetarian\">Vegetarian</option>\
     <option value=\"vegan\">Vegan</option>\
     </select>\
     <input type=\"number\" name=\"max_calories\" placeholder=\"Max kcal\">\
     <input type=\"number\" name=\"max_time\" placeholder=\"Max minutes\">\
     <select name=\"difficulty\">\
     <option value=\"\">Any difficulty</option>\
     <option value=\"Easy\">Easy</option>\
     <option value=\"Mid\">Mid</option>\
     <option value=\"Hard\">Hard</option>\
     </select>\
     <button type=\"submit\">Search</button>\
     </form>"
        .to_string()
}

fn recipe_card(recipe: &Recipe) -> String {
    format!(
        "<article class=\"recipe\">\
         <h2>{title}</h2>\
         <img src=\"{image}\" alt=\"{title}\">\
         <p class=\"meta\">{minutes} min &middot; {difficulty} &middot; \
         {servings} servings &middot; {nutrition}</p>\
         <div class=\"instructions\">{instructions}</div>\
         <form method=\"post\" action=\"/favorite\" class=\"favorite-form\">\
         <input type=\"hidden\" name=\"recipe_id\" value=\"{id}\">\
         <input type=\"hidden\" name=\"title\" value=\"{title}\">\
         <input type=\"hidden\" name=\"image\" value=\"{image}\">\
         <input type=\"hidden\" name=\"difficulty\" value=\"{difficulty}\">\
         <input type=\"hidden\" name=\"ready_in_minutes\" value=\"{minutes}\">\
         <input type=\"hidden\" name=\"servings\" value=\"{servings}\">\
         <input type=\"hidden\" name=\"nutrition\" value=\"{nutrition}\">\
         <input type=\"hidden\" name=\"instructions\" value=\"{instructions_attr}\">\
         <button type=\"submit\">Save to favorites</button>\
         </form>\
         </article>",
        id = recipe.id,
        title = escape(&recipe.title),
        image = escape(&recipe.image),
        minutes = recipe.ready_in_minutes,
        difficulty = recipe.difficulty,
        servings = escape(&recipe.servings),
        nutrition = escape(&recipe.nutrition),
        instructions = recipe.instructions,
        instructions_attr = escape(&recipe.instructions),
    )
}

pub fn home_page(page: &HomePage) -> Html<String> {
    let mut body = String::new();
    body.push_str(&nav(page.username.as_deref()));
    body.push_str("<h1>RecipeMind</h1>");

    if page.login_success {
        body.push_str("<p class=\"alert alert-ok\">Welcome back!</p>");
    }
    if page.logout_success {
        body.push_str("<p class=\"alert alert-ok\">You have been logged out.</p>");
    }
    if page.username.is_none() {
        body.push_str(&login_form(
            page.login_error.as_deref(),
            page.email.as_deref(),
        ));
    }

    body.push_str(&search_form());

    if let Some(message) = &page.no_results {
        body.push_str(&format!(
            "<p class=\"no-results\">{}</p>",
            escape(message)
        ));
    }
    if !page.recipes.is_empty() {
        body.push_str("<section class=\"results\">");
        for recipe in &page.recipes {
            body.push_str(&recipe_card(recipe));
        }
        body.push_str("</section>");
    }

    layout("RecipeMind", &body)
}

pub fn register_page(error: Option<&str>, success: Option<&str>) -> Html<String> {
    let mut body = String::new();
    body.push_str("<nav><a href=\"/\">Back to search</a></nav>");
    body.push_str("<h1>Create an account</h1>");
    if let Some(message) = error {
        body.push_str(&format!(
            "<p class=\"alert alert-error\">{}</p>",
            escape(message)
        ));
    }
    if let Some(message) = success {
        body.push_str(&format!(
            "<p class=\"alert alert-ok\">{}</p>",
            escape(message)
        ));
    }
    body.push_str(
        "<form method=\"post\" action=\"/register\" class=\"register-form\">\
         <input type=\"text\" name=\"username\" placeholder=\"Username\">\
         <input type=\"email\" name=\"email\" placeholder=\"Email\">\
         <input type=\"password\" name=\"password\" placeholder=\"Password (8+ characters)\">\
         <button type=\"submit\">Register</button>\
         </form>",
    );
    layout("Register - RecipeMind", &body)
}

pub fn favorites_page(favorites: &[Favorite]) -> Html<String> {
    let mut body = String::new();
    body.push_str("<nav><a href=\"/\">Back to search</a> <a href=\"/logout\">Log out</a></nav>");
    body.push_str("<h1>My favorites</h1>");

    if favorites.is_empty() {
        body.push_str("<p class=\"no-results\">You have no favorite recipes yet.</p>");
    } else {
        body.push_str("<section class=\"results\">");
        for favorite in favorites {
            body.push_str(&format!(
                "<article class=\"recipe\">\
                 <h2>{title}</h2>\
                 <img src=\"{image}\" alt=\"{title}\">\
                 <p class=\"meta\">{minutes} min &middot; {difficulty} &middot; \
                 {servings} servings &middot; {nutrition}</p>\
                 <div class=\"instructions\">{instructions}</div>\
                 <form method=\"post\" action=\"/remove-favorite\">\
                 <input type=\"hidden\" name=\"recipe_id\" value=\"{id}\">\
                 <button type=\"submit\">Remove</button>\
                 </form>\
                 </article>",
                id = favorite.recipe_id,
                title = escape(&favorite.title),
                image = escape(&favorite.image),
                minutes = favorite.ready_in_minutes,
                difficulty = escape(&favorite.difficulty),
                servings = escape(&favorite.servings),
                nutrition = escape(&favorite.nutrition),
                instructions = favorite.instructions,
            ));
        }
        body.push_str("</section>");
    }
    layout("My favorites - RecipeMind", &body)
}

pub fn error_page(message: &str) -> Html<String> {
    let body = format!(
        "<nav><a href=\"/\">Back to search</a></nav>\
         <p class=\"alert alert-error\">{}</p>",
        escape(message)
    );
    layout("Error - RecipeMind", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::criteria::Difficulty;

    #[test]
    fn escape_covers_html_special_characters() {
        assert_eq!(
            escape(r#"<b>"fish & chips"</b> 'n more"#),
            "&lt;b&gt;&quot;fish &amp; chips&quot;&lt;/b&gt; &#39;n more"
        );
    }

    #[test]
    fn home_page_shows_login_banner() {
        let page = home_page(&HomePage {
            login_success: true,
            username: Some("astrid".into()),
            ..HomePage::default()
        });
        assert!(page.0.contains("Welcome back!"));
        assert!(page.0.contains("Logged in as astrid"));
    }

    #[test]
    fn home_page_echoes_email_on_login_error() {
        let page = home_page(&HomePage {
            login_error: Some("Invalid email or password.".into()),
            email: Some("astrid@example.com".into()),
            ..HomePage::default()
        });
        assert!(page.0.contains("Invalid email or password."));
        assert!(page.0.contains("value=\"astrid@example.com\""));
    }

    #[test]
    fn home_page_escapes_recipe_titles() {
        let page = home_page(&HomePage {
            recipes: vec![Recipe {
                id: 1,
                title: "Tofu <3".into(),
                image: String::new(),
                ready_in_minutes: 10,
                servings: "2".into(),
                nutrition: "100 kcal".into(),
                difficulty: Difficulty::Easy,
                instructions: "<ol><li>Mix.</li></ol>".into(),
            }],
            ..HomePage::default()
        });
        assert!(page.0.contains("Tofu &lt;3"));
        assert!(page.0.contains("<ol><li>Mix.</li></ol>"));
    }

    #[test]
    fn anonymous_home_page_offers_login_and_register() {
        let page = home_page(&HomePage::default());
        assert!(page.0.contains("action=\"/login\""));
        assert!(page.0.contains("href=\"/register\""));
    }
}
