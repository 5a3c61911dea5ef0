use crate::constants::*;
use crate::core::{flag_for_location, project, PlazaState, Projected, ProjectionParams};
use crate::dom;
use web_sys as web;

/// DOM elements backing one avatar.
pub struct AvatarNodes {
    pub root: web::HtmlElement,
    reflection: web::HtmlElement,
    flag: Option<web::HtmlImageElement>,
}

#[inline]
fn sprite_url(character: u32) -> String {
    format!("{}CHARACTER-{}.svg", ASSET_BASE, character)
}

/// Create one `.mii` element per avatar under `container`, in catalog order.
pub fn mount(
    document: &web::Document,
    container: &web::HtmlElement,
    state: &PlazaState,
) -> anyhow::Result<Vec<AvatarNodes>> {
    let mut nodes = Vec::with_capacity(state.avatars.len());
    for a in &state.avatars {
        let dj = state
            .catalog
            .djs
            .get(a.id)
            .ok_or_else(|| anyhow::anyhow!("avatar {} has no catalog entry", a.id))?;
        let root = dom::create_html(document, "div", AVATAR_CLASS)?;
        _ = root.set_attribute("data-id", &a.id.to_string());

        // Unmapped locations get no flag at all
        let flag = match flag_for_location(&dj.location) {
            Some(file) => {
                let src = format!("{}{}", ASSET_BASE, file);
                let img = dom::create_image(document, FLAG_CLASS, &src, &dj.location)?;
                _ = root.append_child(&img);
                Some(img)
            }
            None => None,
        };

        let alt = format!("Character {}", a.character);
        let sprite = dom::create_image(document, CHARACTER_CLASS, &sprite_url(a.character), &alt)?;
        _ = root.append_child(&sprite);

        let reflection = dom::create_html(document, "div", REFLECTION_CLASS)?;
        let mirrored =
            dom::create_image(document, CHARACTER_CLASS, &sprite_url(a.character), &alt)?;
        _ = reflection.append_child(&mirrored);
        _ = root.append_child(&reflection);

        container
            .append_child(&root)
            .map_err(|e| anyhow::anyhow!("mount avatar {}: {:?}", a.id, e))?;
        nodes.push(AvatarNodes {
            root,
            reflection,
            flag,
        });
    }
    log::info!("[render] mounted {} avatars", nodes.len());
    Ok(nodes)
}

pub fn unmount(nodes: &[AvatarNodes]) {
    for n in nodes {
        n.root.remove();
    }
}

/// Project the current state and write it to the avatar elements.
pub fn draw(nodes: &[AvatarNodes], state: &PlazaState) {
    let filtered = state.has_filter();
    let params = ProjectionParams {
        viewport: state.viewport,
        filtered,
        depth_offset: state.depth.offset,
        parallax_x: state.parallax.current.x,
        grid_scale: state.grid_scale,
        display_cap: state.display_cap,
    };
    let items = project(&state.avatars, &params);
    for (order, item) in items.iter().enumerate() {
        let Some(node) = nodes.get(item.id) else {
            continue;
        };
        let fade_in = state.avatars.get(item.id).is_some_and(|a| a.fade_in);
        apply(node, item, order, filtered, fade_in);
    }
}

fn apply(node: &AvatarNodes, p: &Projected, order: usize, filtered: bool, fade_in: bool) {
    let root = &node.root;
    dom::set_class(root, HIDDEN_CLASS, !p.shown);
    dom::set_class(root, ON_MAP_CLASS, !filtered);
    dom::set_class(root, FADE_IN_CLASS, fade_in);

    let style = root.style();
    _ = style.set_property(
        "transform",
        &format!(
            "translate(calc({:.2}px - 50%), calc({:.2}px - 50%)) scale({:.4})",
            p.tx, p.ty, p.scale
        ),
    );
    _ = style.set_property("opacity", &format!("{:.3}", p.opacity));
    let blur = if p.blur > 0.0 {
        format!("blur({:.2}px)", p.blur)
    } else {
        "none".to_string()
    };
    _ = style.set_property("filter", &blur);
    // Depth mode paints far-to-near; grid mode keeps catalog order
    _ = style.set_property("z-index", &order.to_string());

    dom::set_shown(&node.reflection, p.shown);
    _ = node
        .reflection
        .style()
        .set_property("opacity", &format!("{:.2}", p.shadow_opacity));

    if let Some(flag) = &node.flag {
        dom::set_shown(flag, p.in_grid);
        if p.in_grid && p.scale > 0.0 {
            _ = flag.style().set_property(
                "transform",
                &format!("rotateX(45deg) scaleX({:.4})", FLAG_STRETCH / p.scale),
            );
            _ = flag
                .style()
                .set_property("opacity", &format!("{:.2}", FLAG_OPACITY));
        }
    }
}
