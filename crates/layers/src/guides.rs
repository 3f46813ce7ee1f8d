use scene::World;

use crate::route::{RouteGroup, RouteOverlay};

/// DOM id of the container the guide buttons live in.
pub const GUIDE_HOLDER_ID: &str = "btn-guide-holder";
pub const ACTIVE_BACKGROUND: &str = "#2d8cff";
pub const INACTIVE_BACKGROUND: &str = "rgba(255,255,255,.14)";

/// How a toggle button should look for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPresentation {
    pub id: &'static str,
    pub text: &'static str,
    pub background: &'static str,
    pub active: bool,
}

/// Show/hide switch for one route group, backing one button.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideToggle {
    group: RouteGroup,
    visible: bool,
    button_id: &'static str,
    on_text: &'static str,
    off_text: &'static str,
}

impl GuideToggle {
    /// Toggle for the route lines (group A).
    pub fn route() -> Self {
        Self {
            group: RouteGroup::A,
            visible: true,
            button_id: "btn-guideA",
            on_text: "Route:ON",
            off_text: "Route:OFF",
        }
    }

    /// Toggle for the direction arrows (group B).
    pub fn arrows() -> Self {
        Self {
            group: RouteGroup::B,
            visible: true,
            button_id: "btn-guideB",
            on_text: "→:ON",
            off_text: "→:OFF",
        }
    }

    pub fn group(&self) -> RouteGroup {
        self.group
    }

    pub fn button_id(&self) -> &'static str {
        self.button_id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn presentation(&self) -> ButtonPresentation {
        ButtonPresentation {
            id: self.button_id,
            text: if self.visible {
                self.on_text
            } else {
                self.off_text
            },
            background: if self.visible {
                ACTIVE_BACKGROUND
            } else {
                INACTIVE_BACKGROUND
            },
            active: self.visible,
        }
    }

    /// Push the current flag to every member of the group.
    pub fn apply(&self, overlay: &RouteOverlay, world: &mut World) {
        overlay.set_group_visible(world, self.group, self.visible);
    }

    /// Flip the flag, apply it and return the new button look.
    pub fn toggle(&mut self, overlay: &RouteOverlay, world: &mut World) -> ButtonPresentation {
        self.visible = !self.visible;
        self.apply(overlay, world);
        self.presentation()
    }
}

#[cfg(test)]
mod tests {
    use super::{ACTIVE_BACKGROUND, GuideToggle, INACTIVE_BACKGROUND};
    use crate::route::{RouteGroup, RouteOverlay};
    use foundation::UiScale;
    use pretty_assertions::assert_eq;
    use scene::World;
    use scene::components::{ComponentProperties, PolylineGraphics};

    fn overlay_with_arrows(world: &mut World, n: usize) -> RouteOverlay {
        for _ in 0..n {
            let e = world.spawn();
            world.set_properties(
                e,
                ComponentProperties::new(vec![("style".into(), "arrow".into())]),
            );
            world.set_polyline(e, PolylineGraphics::new(Vec::new()));
        }
        RouteOverlay::style(world, UiScale::ONE)
    }

    #[test]
    fn toggle_hides_then_restores() {
        let mut world = World::new();
        let overlay = overlay_with_arrows(&mut world, 3);
        let mut toggle = GuideToggle::arrows();
        toggle.apply(&overlay, &mut world);
        let initial = toggle.presentation();
        assert_eq!(initial.text, "→:ON");
        assert_eq!(initial.background, ACTIVE_BACKGROUND);

        let off = toggle.toggle(&overlay, &mut world);
        assert_eq!(off.text, "→:OFF");
        assert_eq!(off.background, INACTIVE_BACKGROUND);
        assert!(!off.active);
        assert!(overlay.group(RouteGroup::B).iter().all(|e| !world.is_shown(*e)));

        let on = toggle.toggle(&overlay, &mut world);
        assert_eq!(on, initial);
        assert!(overlay.group(RouteGroup::B).iter().all(|e| world.is_shown(*e)));
    }

    #[test]
    fn route_toggle_targets_group_a() {
        let toggle = GuideToggle::route();
        assert_eq!(toggle.group(), RouteGroup::A);
        assert_eq!(toggle.button_id(), "btn-guideA");
        assert_eq!(toggle.presentation().text, "Route:ON");
    }
}
