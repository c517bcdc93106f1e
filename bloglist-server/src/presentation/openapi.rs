use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::login::{LoginDto, LoginResponseDto};
use crate::presentation::handlers::posts::{
    AuthorLikesDto, AuthorPostsDto, CreatePostDto, FavoritePostDto, OwnerDto, PostDto,
    PostStatisticsDto,
};
use crate::presentation::handlers::users::{AccountDto, RegisterDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::users::register,
        crate::presentation::handlers::users::list_users,
        crate::presentation::handlers::login::login,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::posts::post_statistics
    ),
    components(
        schemas(
            RegisterDto,
            AccountDto,
            LoginDto,
            LoginResponseDto,
            CreatePostDto,
            OwnerDto,
            PostDto,
            FavoritePostDto,
            AuthorPostsDto,
            AuthorLikesDto,
            PostStatisticsDto
        )
    ),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "blogs", description = "Blog catalog and statistics")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
