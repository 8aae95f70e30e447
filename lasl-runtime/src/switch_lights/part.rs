//! # Part Feature
//!
//! 单个零件的灯光包装：解析一次适配器绑定与静态分类，之后永久不变。

use std::cell::OnceCell;
use std::rc::Rc;

use super::adapter::Binding;
use super::cache::ModuleCache;
use super::handle::{InstanceId, Part, Vessel};
use super::regime::Regime;
use crate::config::Settings;

/// EVA 中的 Kerbal 携带的模块
pub const KERBAL_MODULE: &str = "KerbalEVA";

/// 起落架状态灯模块
pub const LANDING_GEAR_MODULE: &str = "ModuleStatusLight";

/// 零件灯光包装
pub struct PartFeature {
    settings: Option<Rc<dyn Settings>>,
    part: Option<Rc<dyn Part>>,
    vessel_id: InstanceId,
    binding: Binding,
    is_kerbal: bool,
    is_landing_gear: bool,
    is_crewable: bool,
    id: OnceCell<String>,
}

impl PartFeature {
    /// 为零件解析绑定
    ///
    /// 按模块声明顺序取第一个已注册的模块。
    pub fn new(
        settings: Rc<dyn Settings>,
        cache: &ModuleCache,
        part: Rc<dyn Part>,
        vessel_id: InstanceId,
    ) -> Self {
        let modules = part.modules();
        let target = modules
            .iter()
            .find(|m| cache.supports_name(m.module_name()));
        let binding = cache.lookup(target);

        let is_kerbal = modules.iter().any(|m| m.module_name() == KERBAL_MODULE);
        let is_landing_gear = modules
            .iter()
            .any(|m| m.module_name() == LANDING_GEAR_MODULE);
        let is_crewable = part.crew_capacity() > 0;

        Self {
            settings: Some(settings),
            part: Some(part),
            vessel_id,
            binding,
            is_kerbal,
            is_landing_gear,
            is_crewable,
            id: OnceCell::new(),
        }
    }

    /// 占位包装
    ///
    /// 超出容量或找不到载具时返回，所有查询都是惰性结果。
    pub fn dummy() -> Self {
        Self {
            settings: None,
            part: None,
            vessel_id: 0,
            binding: Binding::Absent,
            is_kerbal: false,
            is_landing_gear: false,
            is_crewable: false,
            id: OnceCell::from("dummy".to_string()),
        }
    }

    /// 标识：`"<载具实例 ID>:<零件实例 ID>"`，首次访问时计算
    pub fn id(&self) -> &str {
        self.id.get_or_init(|| match &self.part {
            Some(part) => {
                let vessel_id = part
                    .vessel()
                    .map(|v| v.instance_id())
                    .unwrap_or(self.vessel_id);
                format!("{}:{}", vessel_id, part.instance_id())
            }
            None => "dummy".to_string(),
        })
    }

    /// 被包装的零件（占位包装为 `None`）
    pub fn part(&self) -> Option<&Rc<dyn Part>> {
        self.part.as_ref()
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn is_kerbal(&self) -> bool {
        self.is_kerbal
    }

    pub fn is_landing_gear(&self) -> bool {
        self.is_landing_gear
    }

    pub fn is_crewable(&self) -> bool {
        self.is_crewable
    }

    pub fn is_active(&self) -> bool {
        self.binding.is_active()
    }

    /// 按当前阈值判断是否为慢速灯
    pub fn is_slow_light(&self) -> bool {
        self.binding.is_slow_light(self.threshold_in_secs())
    }

    pub fn is_beacon_light(&self) -> bool {
        self.binding.is_beacon_light()
    }

    pub fn is_navigation_light(&self) -> bool {
        self.binding.is_navigation_light()
    }

    pub fn is_strobe_light(&self) -> bool {
        self.binding.is_strobe_light()
    }

    pub fn is_utility_light(&self) -> bool {
        self.binding.is_utility_light()
    }

    pub fn is_on(&self) -> bool {
        self.binding.is_on()
    }

    /// 规则是否排除本零件
    ///
    /// 短路求值：慢速灯查询只在前面的条件都未命中时才会执行。
    pub fn is_excluded_by(&self, regime: &Regime) -> bool {
        regime.ignore_kerbals() && self.is_kerbal
            || regime.ignore_landing_gears() && self.is_landing_gear
            || regime.ignore_crewable_parts() && self.is_crewable
            || regime.ignore_slow_lights() && self.is_slow_light()
    }

    /// 点亮（`None` 等价于 [`Regime::ALL_PARTS`]）
    pub fn turn_on(&self, regime: Option<&Regime>) {
        if self.is_excluded_by(regime.unwrap_or(&Regime::ALL_PARTS)) {
            return;
        }
        self.binding.turn_on();
    }

    /// 熄灭（`None` 等价于 [`Regime::ALL_PARTS`]）
    pub fn turn_off(&self, regime: Option<&Regime>) {
        if self.is_excluded_by(regime.unwrap_or(&Regime::ALL_PARTS)) {
            return;
        }
        self.binding.turn_off();
    }

    fn threshold_in_secs(&self) -> f32 {
        self.settings
            .as_ref()
            .map(|s| s.threshold_in_secs())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for PartFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartFeature")
            .field("id", &self.id())
            .field("binding", &self.binding)
            .field("is_kerbal", &self.is_kerbal)
            .field("is_landing_gear", &self.is_landing_gear)
            .field("is_crewable", &self.is_crewable)
            .finish()
    }
}
