//! Clinical reference palette used to seed a fresh catalog.

/// `(name, r, g, b)` for tissue ids 1 through 82, in id order.
pub const CLINICAL_PALETTE: [(&str, f32, f32, f32); 82] = [
    ("Adrenal_gland", 0.338, 0.961, 0.725),
    ("Air_internal", 0.0, 0.0, 0.0),
    ("Artery", 0.8, 0.0, 0.0),
    ("Bladder", 0.5294, 0.8549, 0.0118),
    ("Blood_vessel", 0.6667, 0.0039, 0.0039),
    ("Bone", 0.929412, 0.839216, 0.584314),
    ("Brain_grey_matter", 0.5, 0.5, 0.5),
    ("Brain_white_matter", 0.9, 0.9, 0.9),
    ("Breast", 0.996, 0.741, 1.0),
    ("Bronchi", 0.528, 0.592, 1.0),
    ("Bronchi_lumen", 0.3686, 0.4745, 0.6353),
    ("Cartilage", 0.627, 0.988, 0.969),
    ("Cerebellum", 0.648, 0.599, 0.838),
    ("Cerebrospinal_fluid", 0.4745, 0.5216, 0.8549),
    ("Connective_tissue", 1.0, 0.705882, 0.0),
    ("Diaphragm", 0.745, 0.188, 0.286),
    ("Ear_cartilage", 0.627, 0.988, 0.969),
    ("Ear_skin", 0.4235, 0.6118, 0.6039),
    ("Epididymis", 0.0, 0.359, 1.0),
    ("Esophagus", 1.0, 0.585, 0.0),
    ("Esophagus_lumen", 1.0, 0.789, 0.635),
    ("Eye_lens", 0.0078, 0.6588, 0.9961),
    ("Eye_vitreous_humor", 0.331, 0.746, 0.937),
    ("Fat", 0.984314, 0.980392, 0.215686),
    ("Gallbladder", 0.2588, 0.9725, 0.2745),
    ("Heart_lumen", 1.0, 0.0, 0.0),
    ("Heart_muscle", 1.0, 0.0, 0.239),
    ("Hippocampus", 0.915, 0.188, 1.0),
    ("Hypophysis", 1.0, 0.0, 0.796),
    ("Hypothalamus", 0.563, 0.239, 0.754),
    ("Intervertebral_disc", 0.6275, 0.9882, 0.9686),
    ("Kidney_cortex", 0.0, 0.754, 0.2),
    ("Kidney_medulla", 0.507, 1.0, 0.479),
    ("Large_intestine", 1.0, 0.303, 0.176),
    ("Large_intestine_lumen", 0.817, 0.556, 0.57),
    ("Larynx", 0.937, 0.561, 0.95),
    ("Liver", 0.4784, 0.2627, 0.1412),
    ("Lung", 0.225, 0.676, 1.0),
    ("Mandible", 0.929412, 0.839216, 0.584314),
    ("Marrow_red", 0.9373, 0.6392, 0.498),
    ("Marrow_white", 0.9216, 0.7882, 0.4863),
    ("Meniscus", 0.577, 0.338, 0.754),
    ("Midbrain", 0.4902, 0.6824, 0.5098),
    ("Muscle", 0.745098, 0.188235, 0.286275),
    ("Nail", 0.873, 0.887, 0.88),
    ("Mucosa", 1.0, 0.631373, 0.745098),
    ("Nerve", 0.0, 0.754, 0.479),
    ("Ovary", 0.718, 0.0, 1.0),
    ("Pancreas", 0.506, 0.259, 0.808),
    ("Patella", 0.929412, 0.839216, 0.584314),
    ("Penis", 0.0, 0.0, 1.0),
    ("Pharynx", 0.3686, 0.4745, 0.6353),
    ("Prostate", 0.19, 0.19, 1.0),
    ("Scrotum", 0.366, 0.549, 1.0),
    ("Skin", 0.746, 0.613, 0.472),
    ("Skull", 0.929412, 0.839216, 0.584314),
    ("Small_intestine", 1.0, 0.775, 0.69),
    ("Small_intestine_lumen", 1.0, 0.4745, 0.6353),
    ("Spinal_cord", 0.0, 0.732, 0.662),
    ("Spleen", 0.6824, 0.9647, 0.7882),
    ("Stomach", 1.0, 0.5, 0.0),
    ("Stomach_lumen", 1.0, 0.738, 0.503),
    ("SAT", 1.0, 0.796079, 0.341176),
    ("Teeth", 0.976471, 0.960784, 0.905882),
    ("Tendon_Ligament", 0.945098, 0.960784, 0.972549),
    ("Testis", 0.0, 0.606, 1.0),
    ("Thalamus", 0.0, 0.415, 0.549),
    ("Thymus", 0.4392, 0.7333, 0.549),
    ("Thyroid_gland", 0.3216, 0.0235, 0.298),
    ("Tongue", 0.8, 0.4, 0.4),
    ("Trachea", 0.183, 1.0, 1.0),
    ("Trachea_lumen", 0.613, 1.0, 1.0),
    ("Ureter_Urethra", 0.3765, 0.6078, 0.0078),
    ("Uterus", 0.894, 0.529, 1.0),
    ("Vagina", 0.608, 0.529, 1.0),
    ("Vein", 0.0, 0.329, 1.0),
    ("Vertebrae", 0.929412, 0.839216, 0.584314),
    ("Pinealbody", 1.0, 0.0, 0.0),
    ("Pons", 0.0, 0.71, 0.7),
    ("Medulla_oblongata", 0.37, 0.67, 0.92),
    ("Cornea", 0.686275, 0.0, 1.0),
    ("Eye_Sclera", 1.0, 0.0, 0.780392),
];
